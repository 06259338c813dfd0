use crate::ast;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A structured GraphQL input value, as it appears in field arguments and
/// declared defaults.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Enum(String),
    Float(f64),
    Int(i64),
    List(Vec<Value>),
    Null,
    Object(IndexMap<String, Value>),
    String(String),
    VarRef(String),
}
impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(str) = self {
            Some(str.as_str())
        } else {
            None
        }
    }

    pub(crate) fn from_ast(ast_value: &ast::query::Value) -> Self {
        match ast_value {
            ast::query::Value::Variable(var_name) =>
                Value::VarRef(var_name.to_string()),

            ast::query::Value::Int(number) =>
                Value::Int(number.as_i64().unwrap_or_default()),

            ast::query::Value::Float(value) =>
                Value::Float(*value),

            ast::query::Value::String(value) =>
                Value::String(value.clone()),

            ast::query::Value::Boolean(value) =>
                Value::Bool(*value),

            ast::query::Value::Null =>
                Value::Null,

            ast::query::Value::Enum(value) =>
                Value::Enum(value.clone()),

            ast::query::Value::List(values) =>
                Value::List(values.iter().map(Value::from_ast).collect()),

            ast::query::Value::Object(entries) =>
                Value::Object(entries.iter().map(|(key, ast_value)|
                    (key.clone(), Value::from_ast(ast_value))
                ).collect()),
        }
    }

    /// Two values are similar when they are of the same kind and carry the
    /// same content. Variables compare by name, object fields compare
    /// irrespective of their order and list items compare positionally.
    pub fn is_similar(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::VarRef(left), Value::VarRef(right)) => left == right,
            (Value::Object(left), Value::Object(right)) =>
                are_similar_entries(
                    left.iter().map(|(name, value)| (name.as_str(), value)),
                    right.iter().map(|(name, value)| (name.as_str(), value)),
                ),
            (Value::List(left), Value::List(right)) =>
                left.len() == right.len()
                    && left.iter().zip(right).all(|(l, r)| l.is_similar(r)),
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Enum(left), Value::Enum(right)) => left == right,
            (Value::Float(left), Value::Float(right)) => left == right,
            (Value::Int(left), Value::Int(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            _ => false,
        }
    }

    /// Structural conversion of a JSON value. Integral numbers become
    /// [`Value::Int`], all other numbers [`Value::Float`].
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(*value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => Value::Int(int),
                None => Value::Float(number.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(value) => Value::String(value.clone()),
            serde_json::Value::Array(items) =>
                Value::List(items.iter().map(Value::from_json).collect()),
            serde_json::Value::Object(entries) =>
                Value::Object(entries.iter().map(|(key, value)| {
                    (key.clone(), Value::from_json(value))
                }).collect()),
        }
    }

    /// Render this value as raw JSON input, substituting variable
    /// references from `variables`. Returns `None` for a reference to a
    /// variable that was not provided; inside objects such entries are
    /// omitted and inside lists they become `null`.
    pub(crate) fn to_json(
        &self,
        variables: &serde_json::Map<String, serde_json::Value>,
    ) -> Option<serde_json::Value> {
        Some(match self {
            Value::Bool(value) => serde_json::Value::Bool(*value),
            Value::Enum(value) => serde_json::Value::String(value.clone()),
            Value::Float(value) =>
                serde_json::Number::from_f64(*value)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            Value::Int(value) => serde_json::Value::Number((*value).into()),
            Value::List(values) => serde_json::Value::Array(values.iter().map(|value| {
                value.to_json(variables).unwrap_or(serde_json::Value::Null)
            }).collect()),
            Value::Null => serde_json::Value::Null,
            Value::Object(entries) => serde_json::Value::Object(entries.iter()
                .filter_map(|(key, value)| Some((key.clone(), value.to_json(variables)?)))
                .collect()),
            Value::String(value) => serde_json::Value::String(value.clone()),
            Value::VarRef(name) => return variables.get(name).cloned(),
        })
    }

    pub(crate) fn to_ast(&self) -> ast::query::Value {
        match self {
            Value::Bool(value) => ast::query::Value::Boolean(*value),
            Value::Enum(value) => ast::query::Value::Enum(value.clone()),
            Value::Float(value) => ast::query::Value::Float(*value),
            // The printer only carries 32-bit integers, which is also the
            // range of GraphQL's `Int`.
            Value::Int(value) => match i32::try_from(*value) {
                Ok(int) => ast::query::Value::Int(int.into()),
                Err(_) => ast::query::Value::Float(*value as f64),
            },
            Value::List(values) =>
                ast::query::Value::List(values.iter().map(Value::to_ast).collect()),
            Value::Null => ast::query::Value::Null,
            Value::Object(entries) =>
                ast::query::Value::Object(entries.iter().map(|(key, value)| {
                    (key.clone(), value.to_ast())
                }).collect::<BTreeMap<_, _>>()),
            Value::String(value) => ast::query::Value::String(value.clone()),
            Value::VarRef(name) => ast::query::Value::Variable(name.clone()),
        }
    }

    /// Key-sorted JSON rendering. Structurally equal values always render to
    /// the same JSON regardless of object-field order.
    pub fn to_canonical_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(value) => serde_json::Value::Bool(*value),
            Value::Enum(value) => serde_json::Value::String(value.clone()),
            Value::Float(value) =>
                serde_json::Number::from_f64(*value)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            Value::Int(value) => serde_json::Value::Number((*value).into()),
            Value::List(values) => serde_json::Value::Array(
                values.iter().map(Value::to_canonical_json).collect(),
            ),
            Value::Null => serde_json::Value::Null,
            Value::Object(entries) => {
                let sorted: BTreeMap<&str, &Value> = entries.iter()
                    .map(|(key, value)| (key.as_str(), value))
                    .collect();
                serde_json::Value::Object(sorted.into_iter()
                    .map(|(key, value)| (key.to_string(), value.to_canonical_json()))
                    .collect())
            },
            Value::String(value) => serde_json::Value::String(value.clone()),
            Value::VarRef(name) => serde_json::Value::String(format!("${name}")),
        }
    }
}

/// Same length, and every entry on the right has a same-named, similar
/// entry on the left. Used for argument lists and object values alike.
pub(crate) fn are_similar_entries<'a>(
    left: impl Iterator<Item = (&'a str, &'a Value)>,
    right: impl Iterator<Item = (&'a str, &'a Value)>,
) -> bool {
    let left_by_name: IndexMap<&str, &Value> = left.collect();
    let mut right_len = 0;
    for (name, right_value) in right {
        right_len += 1;
        match left_by_name.get(name) {
            Some(left_value) if left_value.is_similar(right_value) => (),
            _ => return false,
        }
    }
    right_len == left_by_name.len()
}
