use crate::coercion::InputCoercionError;
use crate::execution::ExecutionError;
use crate::fragment_typemap::FragmentTypeMapBuildError;
use crate::response::FieldError;
use crate::selection::SelectionError;
use thiserror::Error;

/// Everything that can go wrong while building an
/// [`AutoRequester`](crate::requester::AutoRequester) or resolving a
/// property of one of its nodes.
///
/// Completed lazy values hand the same outcome to every accessor, so this
/// (and every error it wraps) is `Clone`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AutoRequesterError {
    #[error("The batch was dropped before it could be flushed.")]
    BatchCancelled,

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    FragmentTypeMap(#[from] FragmentTypeMapBuildError),

    #[error(transparent)]
    InputCoercion(#[from] InputCoercionError),

    #[error("Arguments for the `{field_name}` field must be a JSON object, found `{found}`.")]
    InvalidArguments {
        field_name: String,
        found: String,
    },

    #[error("Variables must be a JSON object, found `{found}`.")]
    InvalidVariables {
        found: String,
    },

    #[error("The `{field_name}` field of the `{type_name}` type is not a non-null object field, so it has no node until it is resolved.")]
    NotAnObjectField {
        field_name: String,
        type_name: String,
    },

    #[error("A lazy value was polled again from inside its own initializer.")]
    ReentrantInitialization,

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Expected {expected} at `{path}` in the response, found `{found}`.")]
    UnexpectedResponseShape {
        expected: String,
        found: String,
        path: String,
    },

    #[error("The response named `{type_name}` as a concrete type, but the schema has no such object type.")]
    UnknownConcreteType {
        type_name: String,
    },

    #[error("The `{type_name}` type has no `{field_name}` field.")]
    UnknownField {
        field_name: String,
        type_name: String,
    },

    #[error("The `{field_name}` field of the `{type_name}` type has an output type (`{output_type}`) that cannot be resolved.")]
    UnsupportedOutputType {
        field_name: String,
        output_type: String,
        type_name: String,
    },
}
