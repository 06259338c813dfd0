use crate::ast;
use crate::selection::SelectionSet;
use std::any::Any;
use std::rc::Rc;

/// One batched round trip: an anonymous query selecting `selection_set`
/// from the query root.
#[derive(Clone)]
pub struct ExecutionRequest {
    pub(crate) context: Option<Rc<dyn Any>>,
    pub(crate) selection_set: SelectionSet,
}
impl ExecutionRequest {
    pub fn new(selection_set: SelectionSet) -> Self {
        Self {
            context: None,
            selection_set,
        }
    }

    /// The caller context attached to the requester, if it is a `T`.
    pub fn context<T: 'static>(&self) -> Option<&T> {
        self.context.as_ref()?.downcast_ref::<T>()
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }

    pub fn to_document(&self) -> ast::query::Document {
        self.selection_set.to_document()
    }

    pub fn with_context(mut self, context: Option<Rc<dyn Any>>) -> Self {
        self.context = context;
        self
    }
}
impl std::fmt::Debug for ExecutionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionRequest")
            .field("has_context", &self.context.is_some())
            .field("selection_set", &self.selection_set)
            .finish()
    }
}
impl std::fmt::Display for ExecutionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.selection_set)
    }
}
