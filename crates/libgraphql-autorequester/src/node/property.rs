use crate::node::LazyValue;
use crate::node::ProxyNode;
use crate::requester::AutoRequesterError;
use crate::response::ResponseValue;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::future::IntoFuture;

/// The memoized handle a [`ProxyNode`] hands out for one of its fields.
///
/// Non-null object fields are known to exist without asking the server, so
/// their child node is available immediately. Every other field shape is
/// resolved lazily.
#[derive(Clone, Debug)]
pub enum Property {
    Lazy(LazyValue<Resolved>),
    Node(ProxyNode),
}
impl Property {
    pub fn as_lazy(&self) -> Option<&LazyValue<Resolved>> {
        if let Self::Lazy(lazy) = self { Some(lazy) } else { None }
    }

    pub fn as_node(&self) -> Option<&ProxyNode> {
        if let Self::Node(node) = self { Some(node) } else { None }
    }

    /// The outcome, if it is already known, without waiting for a batch.
    pub fn peek(&self) -> Option<Result<Resolved, AutoRequesterError>> {
        match self {
            Self::Lazy(lazy) => lazy.peek(),
            Self::Node(node) => Some(Ok(Resolved::Node(node.clone()))),
        }
    }
}
impl IntoFuture for Property {
    type Output = Result<Resolved, AutoRequesterError>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Lazy(lazy) => lazy.into_future().boxed_local(),
            Self::Node(node) => futures::future::ready(Ok(Resolved::Node(node))).boxed_local(),
        }
    }
}

/// The outcome of resolving a [`Property`].
#[derive(Clone, Debug)]
pub enum Resolved {
    /// A list of composite values. Lists of leaf values resolve to a
    /// [`Resolved::Value`] holding a [`ResponseValue::List`].
    List(Vec<Resolved>),
    Node(ProxyNode),
    Null,
    Value(ResponseValue),
}
impl Resolved {
    pub fn as_bool(&self) -> Option<bool> {
        self.as_value()?.as_bool()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value()?.as_f64()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value()?.as_i64()
    }

    pub fn as_list(&self) -> Option<&[Resolved]> {
        if let Self::List(items) = self { Some(items.as_slice()) } else { None }
    }

    pub fn as_node(&self) -> Option<&ProxyNode> {
        if let Self::Node(node) = self { Some(node) } else { None }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value()?.as_str()
    }

    pub fn as_value(&self) -> Option<&ResponseValue> {
        if let Self::Value(value) = self { Some(value) } else { None }
    }

    pub(crate) fn from_leaf(value: &ResponseValue) -> Self {
        if value.is_null() {
            Self::Null
        } else {
            Self::Value(value.clone())
        }
    }

    pub fn into_node(self) -> Option<ProxyNode> {
        if let Self::Node(node) = self { Some(node) } else { None }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}
