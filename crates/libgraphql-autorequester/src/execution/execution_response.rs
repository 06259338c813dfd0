use crate::execution::ExecutionError;
use crate::response::PathSegment;
use crate::response::ResponseValue;
use serde::Deserialize;

/// A standard GraphQL response body: `{ "data": {...}, "errors": [...] }`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}
impl ExecutionResponse {
    /// A successful response. `data` must be a JSON object; anything else
    /// is treated as a response without data.
    pub fn from_data(data: serde_json::Value) -> Self {
        Self {
            data: match data {
                serde_json::Value::Object(entries) => Some(entries),
                _ => None,
            },
            errors: vec![],
        }
    }

    pub fn from_json_str(body: &str) -> Result<Self, ExecutionError> {
        serde_json::from_str(body)
            .map_err(|err| ExecutionError::ResponseDecodeError(err.to_string()))
    }

    /// Convert to a [`ResponseValue`] tree with every path-carrying error
    /// inlined at its path.
    pub(crate) fn into_response_value(self) -> Result<ResponseValue, ExecutionError> {
        let Some(data) = self.data else {
            return Err(ExecutionError::NoData {
                messages: self.errors.into_iter().map(|err| err.message).collect(),
            });
        };

        let mut value = ResponseValue::from_json(&serde_json::Value::Object(data));
        for unplaced in value.inline_errors(&self.errors) {
            tracing::warn!(
                error = %unplaced.message,
                path = ?unplaced.path,
                "execution error could not be attached to a field"
            );
        }
        Ok(value)
    }

    pub fn with_errors(mut self, errors: Vec<GraphQLError>) -> Self {
        self.errors = errors;
        self
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<PathSegment>,
}
impl GraphQLError {
    pub fn new(message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}
