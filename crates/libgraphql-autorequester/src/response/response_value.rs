use crate::execution::GraphQLError;
use crate::response::FieldError;
use crate::response::PathSegment;
use indexmap::IndexMap;

static NULL: ResponseValue = ResponseValue::Null;

/// Data returned by the execution engine, with per-field errors inlined at
/// the position of the field they belong to.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseValue {
    Boolean(bool),
    Error(FieldError),
    List(Vec<ResponseValue>),
    Null,
    Number(serde_json::Number),
    Object(IndexMap<String, ResponseValue>),
    String(String),
}
impl ResponseValue {
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(value) = self { Some(*value) } else { None }
    }

    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(number) = self { number.as_f64() } else { None }
    }

    pub fn as_i64(&self) -> Option<i64> {
        if let Self::Number(number) = self { number.as_i64() } else { None }
    }

    pub fn as_list(&self) -> Option<&[ResponseValue]> {
        if let Self::List(items) = self { Some(items.as_slice()) } else { None }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ResponseValue>> {
        if let Self::Object(entries) = self { Some(entries) } else { None }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(value) = self { Some(value.as_str()) } else { None }
    }

    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Boolean(*value),
            serde_json::Value::Number(number) => Self::Number(number.clone()),
            serde_json::Value::String(value) => Self::String(value.clone()),
            serde_json::Value::Array(items) =>
                Self::List(items.iter().map(Self::from_json).collect()),
            serde_json::Value::Object(entries) =>
                Self::Object(entries.iter().map(|(key, value)| {
                    (key.clone(), Self::from_json(value))
                }).collect()),
        }
    }

    /// Read `key` from this object.
    ///
    /// Reading through `null`, from a non-object or a missing key yields
    /// `null`. Reading through (or onto) an inlined field error yields that
    /// error.
    pub fn get(&self, key: &str) -> Result<&ResponseValue, FieldError> {
        let value = match self {
            Self::Error(err) => return Err(err.clone()),
            Self::Object(entries) => entries.get(key).unwrap_or(&NULL),
            _ => &NULL,
        };
        match value {
            Self::Error(err) => Err(err.clone()),
            value => Ok(value),
        }
    }

    /// Read item `idx` from this list, with the same rules as
    /// [`ResponseValue::get`].
    pub fn index(&self, idx: usize) -> Result<&ResponseValue, FieldError> {
        let value = match self {
            Self::Error(err) => return Err(err.clone()),
            Self::List(items) => items.get(idx).unwrap_or(&NULL),
            _ => &NULL,
        };
        match value {
            Self::Error(err) => Err(err.clone()),
            value => Ok(value),
        }
    }

    /// Place each path-carrying error into this data tree as an
    /// [`ResponseValue::Error`] marker. When the path runs into a `null`
    /// (the engine nulled an ancestor of the failed field) the marker
    /// replaces that `null`.
    ///
    /// Returns the errors that carry no path or whose path does not exist in
    /// the data.
    pub(crate) fn inline_errors<'a>(
        &mut self,
        errors: &'a [GraphQLError],
    ) -> Vec<&'a GraphQLError> {
        let mut unplaced = vec![];
        for error in errors {
            let placed = !error.path.is_empty() && self.place_error(
                error.path.as_slice(),
                FieldError {
                    message: error.message.clone(),
                    path: error.path.clone(),
                },
            );
            if !placed {
                unplaced.push(error);
            }
        }
        unplaced
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Deep-merge `incoming` into `self`.
    ///
    /// Objects merge key-wise and lists item-wise, recursively. A `null`
    /// list item never replaces an existing item. Any other pairing takes
    /// the incoming value.
    pub fn merge(&mut self, incoming: ResponseValue) {
        match (self, incoming) {
            (Self::Object(existing), Self::Object(incoming)) => {
                for (key, incoming_value) in incoming {
                    match existing.get_mut(key.as_str()) {
                        Some(existing_value) => existing_value.merge(incoming_value),
                        None => {
                            existing.insert(key, incoming_value);
                        },
                    }
                }
            },

            (Self::List(existing), Self::List(incoming)) => {
                for (idx, incoming_item) in incoming.into_iter().enumerate() {
                    match existing.get_mut(idx) {
                        Some(_) if incoming_item.is_null() => (),
                        Some(existing_item) => existing_item.merge(incoming_item),
                        None => existing.push(incoming_item),
                    }
                }
            },

            (slot, incoming) => *slot = incoming,
        }
    }

    fn place_error(&mut self, path: &[PathSegment], error: FieldError) -> bool {
        let Some((segment, rest)) = path.split_first() else {
            *self = Self::Error(error);
            return true;
        };

        if self.is_null() {
            *self = Self::Error(error);
            return true;
        }

        match (self, segment) {
            (Self::Object(entries), PathSegment::Key(key)) => {
                if rest.is_empty() && !entries.contains_key(key.as_str()) {
                    entries.insert(key.clone(), Self::Error(error));
                    return true;
                }
                match entries.get_mut(key.as_str()) {
                    Some(child) => child.place_error(rest, error),
                    None => false,
                }
            },

            (Self::List(items), PathSegment::Index(idx)) => match items.get_mut(*idx) {
                Some(child) => child.place_error(rest, error),
                None => false,
            },

            // An error already placed at an ancestor covers this one.
            (Self::Error(_), _) => true,

            _ => false,
        }
    }

    /// Render back to JSON. Inlined field errors render as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Boolean(value) => serde_json::Value::Bool(*value),
            Self::Error(_) | Self::Null => serde_json::Value::Null,
            Self::List(items) =>
                serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Number(number) => serde_json::Value::Number(number.clone()),
            Self::Object(entries) => serde_json::Value::Object(entries.iter().map(|(key, value)| {
                (key.clone(), value.to_json())
            }).collect()),
            Self::String(value) => serde_json::Value::String(value.clone()),
        }
    }
}
impl From<serde_json::Value> for ResponseValue {
    fn from(json: serde_json::Value) -> Self {
        Self::from_json(&json)
    }
}
