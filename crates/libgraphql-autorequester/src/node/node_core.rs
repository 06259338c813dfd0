use crate::node::resolve_field;
use crate::requester::AutoRequesterError;
use crate::requester::RequesterShared;
use crate::response::ResponseValue;
use crate::response::ResponseView;
use crate::selection::canonicalize;
use crate::selection::SelectionSet;
use crate::selection::TYPENAME_FIELD;
use crate::Value;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::RefCell;
use std::rc::Rc;

type Result<T> = std::result::Result<T, AutoRequesterError>;

/// Where a node sends the selections requested of it.
#[derive(Debug)]
pub(crate) enum ExecuteBinding {
    /// The query root: selections go straight to the requester.
    Root,

    /// The value of one field of `parent`.
    ///
    /// When the field is declared with an abstract type, `abstract_root`
    /// names that type and every selection is re-rooted onto it before it
    /// is forwarded.
    Field {
        abstract_root: Option<String>,
        arguments: Vec<(String, Value)>,
        field_name: String,
        parent: Rc<NodeCore>,
        property: String,
    },

    /// One element of a list field of `parent`. The whole list field is
    /// re-requested and the element is read back out at `index_path`.
    ///
    /// When the list's declared element type (`element_root`) is abstract,
    /// the selection is re-rooted onto it, which scopes fields the element
    /// type does not share to this element's concrete type.
    ListElement {
        arguments: Vec<(String, Value)>,
        element_root: String,
        field_name: String,
        index_path: Vec<usize>,
        parent: Rc<NodeCore>,
        property: String,
    },
}

/// The bookkeeping half of a node: its concrete type and how it fetches.
///
/// Child nodes hold their parent's core (never the parent's memoized
/// properties), so the node graph is acyclic.
#[derive(Debug)]
pub(crate) struct NodeCore {
    binding: ExecuteBinding,
    /// Related preload fragments, merged into this node's first request.
    preload: RefCell<Option<SelectionSet>>,
    pub(crate) requester: Rc<RequesterShared>,
    pub(crate) type_name: String,
}
impl NodeCore {
    pub fn new(
        requester: Rc<RequesterShared>,
        type_name: impl Into<String>,
        binding: ExecuteBinding,
    ) -> Result<Rc<Self>> {
        let type_name = type_name.into();
        let preload = requester.fragment_typemap()
            .related_fragments(requester.schema(), &type_name)?;
        Ok(Rc::new(Self {
            binding,
            preload: RefCell::new((!preload.is_empty()).then_some(preload)),
            requester,
            type_name,
        }))
    }

    /// Read the concrete type name off a fetched composite value, checking
    /// that the schema knows it as an object type.
    pub fn concrete_type_of(&self, value: &ResponseValue, path: &str) -> Result<String> {
        let type_name = value.get(TYPENAME_FIELD)?.as_str().ok_or_else(|| {
            AutoRequesterError::UnexpectedResponseShape {
                expected: format!("a `{TYPENAME_FIELD}` string"),
                found: value.to_json().to_string(),
                path: path.to_string(),
            }
        })?;
        if self.requester.schema().object_type(type_name).is_none() {
            return Err(AutoRequesterError::UnknownConcreteType {
                type_name: type_name.to_string(),
            });
        }
        Ok(type_name.to_string())
    }

    /// Request `selection_set` on this node. The returned future yields a
    /// view of this node's value in the response.
    ///
    /// The selection is registered synchronously; only the wait for the
    /// response is deferred.
    pub fn execute(
        self: &Rc<Self>,
        selection_set: SelectionSet,
    ) -> LocalBoxFuture<'static, Result<ResponseView>> {
        match self.try_execute(selection_set) {
            Ok(pending) => pending,
            Err(err) => futures::future::ready(Err(err)).boxed_local(),
        }
    }

    fn try_execute(
        self: &Rc<Self>,
        mut selection_set: SelectionSet,
    ) -> Result<LocalBoxFuture<'static, Result<ResponseView>>> {
        if let Some(preload) = self.preload.borrow_mut().take() {
            selection_set.merge(&preload)?;
        }

        match &self.binding {
            ExecuteBinding::Root => self.requester.execute_root(selection_set),

            ExecuteBinding::Field {
                abstract_root,
                arguments,
                field_name,
                parent,
                property,
            } => {
                let selection_set = match abstract_root {
                    Some(root_type_name) => canonicalize(
                        self.requester.schema(),
                        root_type_name,
                        &self.type_name,
                        &selection_set,
                    )?,
                    None => selection_set,
                };
                Ok(resolve_field(parent, property, field_name, Some(selection_set), arguments))
            },

            ExecuteBinding::ListElement {
                arguments,
                element_root,
                field_name,
                index_path,
                parent,
                property,
            } => {
                let scoped = canonicalize(
                    self.requester.schema(),
                    element_root,
                    &self.type_name,
                    &selection_set,
                )?;
                let list = resolve_field(parent, property, field_name, Some(scoped), arguments);
                Ok(element_of(list, index_path.clone()).boxed_local())
            },
        }
    }
}

async fn element_of(
    list: LocalBoxFuture<'static, Result<ResponseView>>,
    index_path: Vec<usize>,
) -> Result<ResponseView> {
    let list_view = list.await?;
    Ok(index_path.iter().fold(list_view, |view, idx| view.index(*idx)))
}
