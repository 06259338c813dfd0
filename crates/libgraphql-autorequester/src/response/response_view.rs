use crate::response::FieldError;
use crate::response::PathSegment;
use crate::response::ResponseValue;
use std::rc::Rc;

/// A position inside a shared response tree.
///
/// Views are cheap to derive (only the path grows) and are resolved to a
/// [`ResponseValue`] on demand, so errors inlined anywhere along the path
/// surface only when the value is actually read.
#[derive(Clone, Debug)]
pub(crate) struct ResponseView {
    path: Vec<PathSegment>,
    root: Rc<ResponseValue>,
}
impl ResponseView {
    pub fn root(root: Rc<ResponseValue>) -> Self {
        Self {
            path: vec![],
            root,
        }
    }

    pub fn get(&self, key: &str) -> Self {
        self.descend(PathSegment::Key(key.to_string()))
    }

    pub fn index(&self, idx: usize) -> Self {
        self.descend(PathSegment::Index(idx))
    }

    pub fn value(&self) -> Result<&ResponseValue, FieldError> {
        let mut current = self.root.as_ref();
        for segment in &self.path {
            current = match segment {
                PathSegment::Index(idx) => current.index(*idx)?,
                PathSegment::Key(key) => current.get(key)?,
            };
        }
        Ok(current)
    }

    fn descend(&self, segment: PathSegment) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            path,
            root: self.root.clone(),
        }
    }
}
