//! Lazy, batching, caching object graphs over a GraphQL schema.
//!
//! An [`AutoRequester`] hands out [`ProxyNode`]s rooted at the schema's
//! query type. Awaiting a field of a node plans the smallest selection
//! that answers it; accesses made in the same executor turn are merged
//! into a single anonymous query, diffed against everything fetched so
//! far, and handed to the caller's [`ExecutionEngine`].
//!
//! ```ignore
//! let requester = AutoRequester::builder(schema, engine)
//!     .preload_fragments_str("fragment UserId on User { id }")
//!     .build()?;
//! let viewer = requester.query().resolve("viewer").await?;
//! ```

pub mod ast;
pub mod coercion;
pub mod execution;
pub mod file_reader;
pub mod fragment_typemap;
pub mod node;
pub mod requester;
pub mod response;
pub mod schema;
pub mod selection;
pub mod types;
mod value;

pub use execution::ExecutionEngine;
pub use node::LazyValue;
pub use node::Property;
pub use node::ProxyNode;
pub use node::Resolved;
pub use requester::AutoRequester;
pub use requester::AutoRequesterBuilder;
pub use requester::AutoRequesterError;
pub use requester::LocalSpawnScheduler;
pub use requester::Scheduler;
pub use schema::Schema;
pub use value::Value;

#[cfg(test)]
mod test;
