//! Lazily-populated object graphs: every node knows its concrete type up
//! front and fetches field values only when they are awaited.

mod field_resolver;
mod field_strategy;
mod lazy_value;
mod node_core;
mod prefetch;
mod property;
mod proxy_node;

pub(crate) use field_resolver::failed;
pub(crate) use field_resolver::FieldSource;
pub(crate) use field_resolver::request_typename;
pub(crate) use field_resolver::resolve_field;
pub(crate) use field_resolver::resolve_leaf;
pub(crate) use field_resolver::resolve_nullable_object;
pub(crate) use field_strategy::FieldStrategies;
pub(crate) use field_strategy::FieldStrategy;
pub use lazy_value::LazyValue;
pub(crate) use node_core::ExecuteBinding;
pub(crate) use node_core::NodeCore;
pub use property::Property;
pub use property::Resolved;
pub use proxy_node::ProxyNode;

#[cfg(test)]
mod tests;
