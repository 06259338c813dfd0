use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExecutionError {
    /// The engine failed to execute the request at all.
    #[error("Execution failed: {0}")]
    Engine(String),

    #[error("The execution engine returned no data: {}", .messages.join("; "))]
    NoData {
        messages: Vec<String>,
    },

    #[error("Failed to decode the execution response: {0}")]
    ResponseDecodeError(String),
}
