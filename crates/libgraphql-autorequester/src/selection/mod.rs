//! Selection trees and the pure operations the request planner performs on
//! them: merging, similarity, left-outer-join and re-rooting selections from
//! an abstract type onto one of its concrete types.

mod algebra;
mod canonicalize;
mod selection_error;
mod selection_set;

pub use canonicalize::canonicalize;
pub use selection_error::SelectionError;
pub use selection_set::FieldSelection;
pub use selection_set::FragmentSpread;
pub use selection_set::InlineFragment;
pub use selection_set::Selection;
pub use selection_set::SelectionSet;

pub(crate) const TYPENAME_FIELD: &str = "__typename";

#[cfg(test)]
mod tests;
