use crate::execution::ExecutionError;
use crate::execution::ExecutionRequest;
use crate::execution::ExecutionResponse;
use async_trait::async_trait;

/// Executes one anonymous query against a schema.
///
/// Implementations must report field-level failures alongside the data of
/// sibling fields (in [`ExecutionResponse::errors`], with paths) rather than
/// failing the whole call. An `Err` fails every access waiting on the
/// batch.
///
/// Requests are issued from a single thread, so implementations need not
/// be `Send`.
#[async_trait(?Send)]
pub trait ExecutionEngine {
    async fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResponse, ExecutionError>;
}
