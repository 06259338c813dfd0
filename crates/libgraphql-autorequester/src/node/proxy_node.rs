use crate::coercion::arguments_cache_key;
use crate::coercion::coerce_arguments;
use crate::node::FieldSource;
use crate::node::FieldStrategies;
use crate::node::FieldStrategy;
use crate::node::LazyValue;
use crate::node::NodeCore;
use crate::node::Property;
use crate::node::Resolved;
use crate::node::failed;
use crate::node::request_typename;
use crate::node::resolve_leaf;
use crate::node::resolve_nullable_object;
use crate::requester::AutoRequesterError;
use crate::response::ResponseValue;
use crate::selection::TYPENAME_FIELD;
use crate::types::Field;
use crate::Value;
use futures::FutureExt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, AutoRequesterError>;

/// A lazily-populated view of one object in the graph.
///
/// Reading a field through [`get`](Self::get) or [`call`](Self::call)
/// plans the smallest request that answers it and registers that request
/// with the pending batch right away, before the returned [`Property`] is
/// awaited. Reads made during the same turn of the executor therefore
/// share one round trip however they are awaited later. Every property is
/// memoized: the same field (with structurally equal arguments) always
/// hands back the same [`Property`].
///
/// Cloning a `ProxyNode` is cheap and yields a handle to the same node.
#[derive(Clone)]
pub struct ProxyNode {
    pub(crate) core: Rc<NodeCore>,
    properties: Rc<RefCell<HashMap<String, Property>>>,
    strategies: Rc<FieldStrategies>,
}
impl ProxyNode {
    pub(crate) fn new(core: Rc<NodeCore>) -> Self {
        let strategies = core.requester.field_strategies(&core.type_name);
        Self {
            core,
            properties: Rc::new(RefCell::new(HashMap::new())),
            strategies,
        }
    }

    /// Read `field_name` with the given arguments (a JSON object; declared
    /// defaults fill in what is absent). The first read of a property
    /// registers its request with the pending batch.
    ///
    /// Invalid reads (unknown fields, arguments that do not coerce) come
    /// back as an already-failed [`Property::Lazy`].
    pub fn call(&self, field_name: &str, arguments: serde_json::Value) -> Property {
        self.property(field_name, arguments).unwrap_or_else(|err| {
            Property::Lazy(LazyValue::ready(Err(err)))
        })
    }

    /// Read `field_name` without arguments. Argument-taking fields are read
    /// with their declared defaults.
    pub fn get(&self, field_name: &str) -> Property {
        self.call(field_name, serde_json::Value::Object(serde_json::Map::new()))
    }

    /// The child node of a non-null object field. Other fields are rejected
    /// without being read.
    pub fn object(&self, field_name: &str) -> Result<ProxyNode> {
        self.field(field_name)?;
        let not_an_object = || AutoRequesterError::NotAnObjectField {
            field_name: field_name.to_string(),
            type_name: self.core.type_name.clone(),
        };
        if !matches!(
            self.strategies.get(field_name),
            Some(FieldStrategy::Object { nullable: false, .. }),
        ) {
            return Err(not_an_object());
        }
        match self.property(field_name, serde_json::Value::Object(serde_json::Map::new()))? {
            Property::Node(node) => Ok(node),
            Property::Lazy(_) => Err(not_an_object()),
        }
    }

    /// Shorthand for `self.get(field_name).await`.
    pub async fn resolve(&self, field_name: &str) -> Result<Resolved> {
        self.get(field_name).await
    }

    /// Whether `self` and `other` are handles to the same node.
    pub fn same_node(&self, other: &ProxyNode) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    /// The concrete object type of this node. Always known without a round
    /// trip.
    pub fn typename(&self) -> &str {
        self.core.type_name.as_str()
    }

    fn configure(
        &self,
        property: String,
        field_name: &str,
        strategy: FieldStrategy,
        arguments: Vec<(String, Value)>,
    ) -> Result<Property> {
        let source = FieldSource {
            arguments,
            field_name: field_name.to_string(),
            parent: self.core.clone(),
            property,
        };

        Ok(match strategy {
            FieldStrategy::Leaf => Property::Lazy(LazyValue::new(move || {
                resolve_leaf(source.resolve(None))
            })),

            FieldStrategy::Object { nullable: false, type_name } =>
                Property::Node(source.child_node(type_name, None)?),

            FieldStrategy::Object { nullable: true, type_name } =>
                Property::Lazy(LazyValue::new(move || {
                    let child = match source.child_node(type_name, None) {
                        Ok(child) => child,
                        Err(err) => return failed(err),
                    };
                    let discriminator = request_typename(&child);
                    resolve_nullable_object(child, discriminator).boxed_local()
                })),

            FieldStrategy::Abstract { type_name } =>
                Property::Lazy(LazyValue::new(move || {
                    let initial = match source.initial_selections(&type_name) {
                        Ok(initial) => initial,
                        Err(err) => return failed(err),
                    };
                    let field_value = source.resolve(Some(initial));
                    source.resolve_abstract(type_name, field_value).boxed_local()
                })),

            FieldStrategy::CompositeList { depth, element_type } =>
                Property::Lazy(LazyValue::new(move || {
                    let initial = match source.initial_selections(&element_type) {
                        Ok(initial) => initial,
                        Err(err) => return failed(err),
                    };
                    let field_value = source.resolve(Some(initial));
                    source.resolve_list(depth, element_type, field_value).boxed_local()
                })),

            FieldStrategy::Unsupported { output_type } =>
                return Err(AutoRequesterError::UnsupportedOutputType {
                    field_name: field_name.to_string(),
                    output_type,
                    type_name: self.core.type_name.clone(),
                }),
        })
    }

    fn field(&self, field_name: &str) -> Result<&Field> {
        self.core.requester.schema()
            .object_type(&self.core.type_name)
            .and_then(|object_type| object_type.field(field_name))
            .ok_or_else(|| AutoRequesterError::UnknownField {
                field_name: field_name.to_string(),
                type_name: self.core.type_name.clone(),
            })
    }

    fn property(&self, field_name: &str, arguments: serde_json::Value) -> Result<Property> {
        if field_name == TYPENAME_FIELD {
            return Ok(Property::Lazy(LazyValue::ready(Ok(Resolved::Value(
                ResponseValue::String(self.core.type_name.clone()),
            )))));
        }

        let field = self.field(field_name)?;
        let serde_json::Value::Object(raw_arguments) = arguments else {
            return Err(AutoRequesterError::InvalidArguments {
                field_name: field_name.to_string(),
                found: arguments.to_string(),
            });
        };
        let arguments = coerce_arguments(self.core.requester.schema(), field, &raw_arguments)?;
        let property = if field.parameters().is_empty() {
            field_name.to_string()
        } else {
            arguments_cache_key(field_name, &arguments)
        };

        if let Some(existing) = self.properties.borrow().get(&property) {
            return Ok(existing.clone());
        }

        let strategy = self.strategies.get(field_name).cloned().ok_or_else(|| {
            AutoRequesterError::UnknownField {
                field_name: field_name.to_string(),
                type_name: self.core.type_name.clone(),
            }
        })?;
        let configured = self.configure(property.clone(), field_name, strategy, arguments)?;
        self.properties.borrow_mut().insert(property, configured.clone());
        if let Property::Lazy(lazy) = &configured {
            lazy.start();
        }
        Ok(configured)
    }
}
impl std::fmt::Debug for ProxyNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyNode")
            .field("typename", &self.core.type_name)
            .field("properties", &self.properties.borrow().len())
            .finish()
    }
}
