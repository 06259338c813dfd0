//! The root of a lazily-populated graph: batching, read-through caching of
//! everything fetched so far, and the hand-off to the execution engine.

mod auto_requester;
mod auto_requester_builder;
mod auto_requester_error;
mod requester_shared;
mod scheduler;

pub use auto_requester::AutoRequester;
pub use auto_requester_builder::AutoRequesterBuilder;
pub use auto_requester_error::AutoRequesterError;
pub(crate) use requester_shared::RequesterShared;
pub use scheduler::LocalSpawnScheduler;
pub use scheduler::Scheduler;

#[cfg(test)]
mod tests;
