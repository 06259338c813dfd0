//! Coercion of caller-supplied JSON arguments into typed [`Value`]s, and the
//! content hash that identifies a field invocation by its coerced arguments.
//!
//! [`Value`]: crate::Value

mod coerce_arguments;
mod input_coercion_error;

pub use coerce_arguments::arguments_cache_key;
pub use coerce_arguments::coerce_arguments;
pub use coerce_arguments::coerce_value;
pub use input_coercion_error::InputCoercionError;

#[cfg(test)]
mod tests;
