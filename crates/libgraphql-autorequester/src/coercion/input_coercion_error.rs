use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputCoercionError {
    #[error("Expected a value of type `{expected_type}` at `{path}`, found {found}.")]
    InvalidValue {
        expected_type: String,
        found: String,
        path: String,
    },

    #[error("The required argument `{argument_name}` of the `{field_name}` field was not provided.")]
    MissingRequiredArgument {
        argument_name: String,
        field_name: String,
    },

    #[error("`{type_name}` is an output type and cannot be used for the input at `{path}`.")]
    NotAnInputType {
        path: String,
        type_name: String,
    },

    #[error("Null provided for the non-null input `{path}` of type `{expected_type}`.")]
    NullValueForNonNull {
        expected_type: String,
        path: String,
    },

    #[error("The `{type_name}` type referenced at `{path}` is not defined.")]
    UndefinedType {
        path: String,
        type_name: String,
    },

    #[error("The `{field_name}` field has no argument named `{argument_name}`.")]
    UnknownArgument {
        argument_name: String,
        field_name: String,
    },

    #[error("The `{type_name}` input type has no field named `{input_field_name}` (at `{path}`).")]
    UnknownInputField {
        input_field_name: String,
        path: String,
        type_name: String,
    },
}
