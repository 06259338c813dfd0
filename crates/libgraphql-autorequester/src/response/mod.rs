mod field_error;
mod response_value;
mod response_view;

pub use field_error::FieldError;
pub use field_error::PathSegment;
pub use response_value::ResponseValue;
pub(crate) use response_view::ResponseView;
