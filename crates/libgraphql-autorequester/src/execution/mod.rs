//! The boundary to the GraphQL engine that actually executes the batched
//! selection sets this crate plans.

mod execution_engine;
mod execution_error;
mod execution_request;
mod execution_response;

pub use execution_engine::ExecutionEngine;
pub use execution_error::ExecutionError;
pub use execution_request::ExecutionRequest;
pub use execution_response::ExecutionResponse;
pub use execution_response::GraphQLError;
