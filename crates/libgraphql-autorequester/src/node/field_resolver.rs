use crate::node::ExecuteBinding;
use crate::node::NodeCore;
use crate::node::ProxyNode;
use crate::node::Resolved;
use crate::requester::AutoRequesterError;
use crate::response::ResponseValue;
use crate::response::ResponseView;
use crate::selection::FieldSelection;
use crate::selection::SelectionSet;
use crate::selection::TYPENAME_FIELD;
use crate::Value;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::rc::Rc;

type Result<T> = std::result::Result<T, AutoRequesterError>;
type PendingView = LocalBoxFuture<'static, Result<ResponseView>>;

/// Request exactly one field of `node` and yield a view of its value.
///
/// The field is aliased to `property` when the two differ (argument-taking
/// fields are always aliased to their arguments cache key). Every request
/// any node makes goes through here.
pub(crate) fn resolve_field(
    node: &Rc<NodeCore>,
    property: &str,
    field_name: &str,
    selection_set: Option<SelectionSet>,
    arguments: &[(String, Value)],
) -> PendingView {
    let mut field = FieldSelection::new(field_name).with_arguments(arguments.to_vec());
    if property != field_name {
        field = field.with_alias(property);
    }
    if let Some(selection_set) = selection_set {
        field = field.with_selection_set(selection_set);
    }

    let node_value = node.execute(SelectionSet::from_selections(vec![field.into()]));
    property_of(node_value, property.to_string()).boxed_local()
}

async fn property_of(node_value: PendingView, property: String) -> Result<ResponseView> {
    Ok(node_value.await?.get(&property))
}

pub(crate) fn failed<T: 'static>(err: AutoRequesterError) -> LocalBoxFuture<'static, Result<T>> {
    futures::future::ready(Err(err)).boxed_local()
}

/// One field of a parent node, as read through one property.
pub(crate) struct FieldSource {
    pub arguments: Vec<(String, Value)>,
    pub field_name: String,
    pub parent: Rc<NodeCore>,
    pub property: String,
}
impl FieldSource {
    pub fn child_node(
        self,
        type_name: impl Into<String>,
        abstract_root: Option<String>,
    ) -> Result<ProxyNode> {
        let requester = self.parent.requester.clone();
        Ok(ProxyNode::new(NodeCore::new(requester, type_name, ExecuteBinding::Field {
            abstract_root,
            arguments: self.arguments,
            field_name: self.field_name,
            parent: self.parent,
            property: self.property,
        })?))
    }

    pub fn initial_selections(&self, type_name: &str) -> Result<SelectionSet> {
        let requester = &self.parent.requester;
        Ok(requester.fragment_typemap().initial_selections(requester.schema(), type_name)?)
    }

    pub fn resolve(&self, selection_set: Option<SelectionSet>) -> PendingView {
        resolve_field(
            &self.parent,
            &self.property,
            &self.field_name,
            selection_set,
            &self.arguments,
        )
    }

    /// Build the node for an abstract-typed field once its concrete type is
    /// known.
    pub async fn resolve_abstract(
        self,
        abstract_type: String,
        field_value: PendingView,
    ) -> Result<Resolved> {
        let field_view = field_value.await?;
        let value = field_view.value()?;
        if value.is_null() {
            return Ok(Resolved::Null);
        }
        let concrete_type = self.parent.concrete_type_of(value, &self.property)?;
        Ok(Resolved::Node(self.child_node(concrete_type, Some(abstract_type))?))
    }

    /// Build one node per non-null element of a composite list field,
    /// `depth` levels of nested lists deep.
    pub async fn resolve_list(
        self,
        depth: usize,
        element_type: String,
        field_value: PendingView,
    ) -> Result<Resolved> {
        let list_view = field_value.await?;
        self.build_list(list_view.value()?, depth, &element_type, vec![])
    }

    fn build_list(
        &self,
        value: &ResponseValue,
        depth: usize,
        element_type: &str,
        index_path: Vec<usize>,
    ) -> Result<Resolved> {
        let items = match value {
            ResponseValue::Null => return Ok(Resolved::Null),
            ResponseValue::List(items) => items,
            other => return Err(AutoRequesterError::UnexpectedResponseShape {
                expected: "a list".to_string(),
                found: other.to_json().to_string(),
                path: self.render_path(&index_path),
            }),
        };

        let mut elements = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let mut item_path = index_path.clone();
            item_path.push(idx);

            let element = match item {
                ResponseValue::Error(err) => return Err(err.clone().into()),
                ResponseValue::Null => Resolved::Null,
                item if depth > 1 =>
                    self.build_list(item, depth - 1, element_type, item_path)?,
                item => {
                    let concrete_type = self.parent.concrete_type_of(
                        item,
                        &self.render_path(&item_path),
                    )?;
                    let element_core = NodeCore::new(
                        self.parent.requester.clone(),
                        concrete_type,
                        ExecuteBinding::ListElement {
                            arguments: self.arguments.clone(),
                            element_root: element_type.to_string(),
                            field_name: self.field_name.clone(),
                            index_path: item_path,
                            parent: self.parent.clone(),
                            property: self.property.clone(),
                        },
                    )?;
                    Resolved::Node(ProxyNode::new(element_core))
                },
            };
            elements.push(element);
        }
        Ok(Resolved::List(elements))
    }

    fn render_path(&self, index_path: &[usize]) -> String {
        index_path.iter().fold(self.property.clone(), |path, idx| format!("{path}.{idx}"))
    }
}

pub(crate) async fn resolve_leaf(field_value: PendingView) -> Result<Resolved> {
    Ok(Resolved::from_leaf(field_value.await?.value()?))
}

/// A nullable object field is null exactly when its `__typename` is.
pub(crate) async fn resolve_nullable_object(
    child: ProxyNode,
    discriminator: PendingView,
) -> Result<Resolved> {
    if discriminator.await?.value()?.is_null() {
        Ok(Resolved::Null)
    } else {
        Ok(Resolved::Node(child))
    }
}

pub(crate) fn request_typename(node: &ProxyNode) -> PendingView {
    resolve_field(&node.core, TYPENAME_FIELD, TYPENAME_FIELD, None, &[])
}
