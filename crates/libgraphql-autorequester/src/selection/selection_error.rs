use thiserror::Error;

/// Precondition failures of the selection algebra. These indicate a caller
/// handed the algebra a shape it does not operate on; they are never
/// produced by well-formed request planning.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("The `{fragment_name}` fragment spreads itself.")]
    FragmentSpreadCycle {
        fragment_name: String,
    },

    #[error("Failed to parse selection document: {0}")]
    ParseError(String),

    #[error(
        "The `{fragment_name}` fragment spread must be inlined before it \
        reaches the selection algebra."
    )]
    UnexpandedFragmentSpread {
        fragment_name: String,
    },

    #[error("The `{fragment_name}` fragment is spread but never defined.")]
    UndefinedFragment {
        fragment_name: String,
    },

    #[error("The `{type_name}` type is not a known composite type.")]
    UnknownCompositeType {
        type_name: String,
    },

    #[error("Expected a document holding exactly one anonymous selection set.")]
    UnsupportedDocument,

    #[error("Only query operations can be planned, found a {operation} operation.")]
    UnsupportedOperation {
        operation: String,
    },

    #[error("Only field selections can be re-rooted onto a concrete type, found {found}.")]
    UnsupportedSelection {
        found: String,
    },
}
