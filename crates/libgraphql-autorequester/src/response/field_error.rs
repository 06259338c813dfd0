use serde::Deserialize;
use thiserror::Error;

/// An error the execution engine reported for one field of an otherwise
/// successful response.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message} (at `{}`)", render_path(.path))]
pub struct FieldError {
    pub message: String,
    pub path: Vec<PathSegment>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}
impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "{idx}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}
impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}
impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

fn render_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(PathSegment::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
