use crate::coercion::InputCoercionError;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::NamedTypeAnnotation;
use crate::types::TypeAnnotation;
use crate::Value;
use indexmap::IndexMap;
use sha2::Digest;
use sha2::Sha256;

type JsonMap = serde_json::Map<String, serde_json::Value>;
type Result<T> = std::result::Result<T, InputCoercionError>;

/// The cache key (and wire alias) of one invocation of `field_name` with the
/// given coerced arguments: `{field_name}_{sha256 of the key-sorted JSON
/// rendering of the arguments}`.
///
/// Argument lists that differ only in the order of their entries (at any
/// depth of an object value) produce the same key.
pub fn arguments_cache_key(field_name: &str, arguments: &[(String, Value)]) -> String {
    let args_object = Value::Object(arguments.iter().cloned().collect());
    let canonical = args_object.to_canonical_json().to_string();
    let digest = Sha256::digest(canonical.as_bytes());
    format!("{field_name}_{}", hex::encode(digest))
}

/// Coerce raw JSON arguments against `field`'s declared parameters.
///
/// Parameters are visited in declaration order. A declared default applies
/// only when the argument is absent; an explicit `null` is kept as-is.
/// Absent arguments without a default are omitted.
pub fn coerce_arguments(
    schema: &Schema,
    field: &Field,
    raw_arguments: &JsonMap,
) -> Result<Vec<(String, Value)>> {
    if let Some(unknown) = raw_arguments.keys()
        .find(|arg_name| !field.parameters().contains_key(arg_name.as_str())) {
        return Err(InputCoercionError::UnknownArgument {
            argument_name: unknown.to_string(),
            field_name: field.name().to_string(),
        });
    }

    let mut coerced = vec![];
    for (param_name, param) in field.parameters() {
        let coerced_value = match (raw_arguments.get(param_name), param.default_value()) {
            (Some(raw_value), _) =>
                coerce_value(schema, param.type_annotation(), raw_value, param_name)?,

            (None, Some(default_value)) =>
                coerce_default(schema, param.type_annotation(), default_value, param_name)?,

            (None, None) if !param.type_annotation().nullable() =>
                return Err(InputCoercionError::MissingRequiredArgument {
                    argument_name: param_name.to_string(),
                    field_name: field.name().to_string(),
                }),

            (None, None) => continue,
        };
        coerced.push((param_name.to_string(), coerced_value));
    }
    Ok(coerced)
}

/// Declared defaults are written as GraphQL literals; they go through the
/// same coercion as caller input so that e.g. a `Float` default of `1`
/// hashes the same as a caller-provided `1.0`.
fn coerce_default(
    schema: &Schema,
    annot: &TypeAnnotation,
    default_value: &Value,
    path: &str,
) -> Result<Value> {
    match default_value.to_json(&JsonMap::new()) {
        Some(raw_default) => coerce_value(schema, annot, &raw_default, path),
        None => Ok(default_value.clone()),
    }
}

/// Coerce a single raw JSON value against a declared input type. `path`
/// names the value in error messages (e.g. `filter.kinds[2]`).
pub fn coerce_value(
    schema: &Schema,
    annot: &TypeAnnotation,
    raw_value: &serde_json::Value,
    path: &str,
) -> Result<Value> {
    if raw_value.is_null() {
        return if annot.nullable() {
            Ok(Value::Null)
        } else {
            Err(InputCoercionError::NullValueForNonNull {
                expected_type: annot.to_string(),
                path: path.to_string(),
            })
        };
    }

    match annot {
        TypeAnnotation::List(list_annot) => match raw_value {
            serde_json::Value::Array(items) =>
                items.iter()
                    .enumerate()
                    .map(|(idx, item)| coerce_value(
                        schema,
                        list_annot.inner_type(),
                        item,
                        &format!("{path}[{idx}]"),
                    ))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List),

            // A lone value is accepted where a list is expected.
            single_value =>
                Ok(Value::List(vec![
                    coerce_value(schema, list_annot.inner_type(), single_value, path)?,
                ])),
        },

        TypeAnnotation::Named(named_annot) =>
            coerce_named_value(schema, named_annot, raw_value, path),
    }
}

fn coerce_named_value(
    schema: &Schema,
    named_annot: &NamedTypeAnnotation,
    raw_value: &serde_json::Value,
    path: &str,
) -> Result<Value> {
    let graphql_type = named_annot.graphql_type(schema)
        .ok_or_else(|| InputCoercionError::UndefinedType {
            path: path.to_string(),
            type_name: named_annot.type_name().to_string(),
        })?;

    let coerced = match graphql_type {
        GraphQLType::Bool => raw_value.as_bool().map(Value::Bool),

        GraphQLType::Enum(enum_t) =>
            raw_value.as_str()
                .filter(|enum_value| enum_t.has_value(enum_value))
                .map(|enum_value| Value::Enum(enum_value.to_string())),

        GraphQLType::Float => raw_value.as_f64().map(Value::Float),

        GraphQLType::ID => match raw_value {
            serde_json::Value::String(id) => Some(Value::String(id.clone())),
            serde_json::Value::Number(number) if number.is_i64() || number.is_u64() =>
                Some(Value::String(number.to_string())),
            _ => None,
        },

        GraphQLType::InputObject(input_t) =>
            return match raw_value.as_object() {
                Some(raw_fields) => coerce_input_object(schema, input_t, raw_fields, path),
                None => Err(invalid_value(named_annot, raw_value, path)),
            },

        GraphQLType::Int =>
            raw_value.as_i64()
                .filter(|int| i32::try_from(*int).is_ok())
                .map(Value::Int),

        GraphQLType::Scalar(_) => Some(Value::from_json(raw_value)),

        GraphQLType::String => raw_value.as_str().map(|str| Value::String(str.to_string())),

        GraphQLType::Interface(_) | GraphQLType::Object(_) | GraphQLType::Union(_) =>
            return Err(InputCoercionError::NotAnInputType {
                path: path.to_string(),
                type_name: named_annot.type_name().to_string(),
            }),
    };

    coerced.ok_or_else(|| invalid_value(named_annot, raw_value, path))
}

fn coerce_input_object(
    schema: &Schema,
    input_t: &InputObjectType,
    raw_fields: &JsonMap,
    path: &str,
) -> Result<Value> {
    if let Some(unknown) = raw_fields.keys()
        .find(|field_name| !input_t.fields().contains_key(field_name.as_str())) {
        return Err(InputCoercionError::UnknownInputField {
            input_field_name: unknown.to_string(),
            path: path.to_string(),
            type_name: input_t.name().to_string(),
        });
    }

    let mut coerced = IndexMap::new();
    for (field_name, input_field) in input_t.fields() {
        let field_path = format!("{path}.{field_name}");
        let coerced_value = match (raw_fields.get(field_name), input_field.default_value()) {
            (Some(raw_value), _) =>
                coerce_value(schema, input_field.type_annotation(), raw_value, &field_path)?,

            (None, Some(default_value)) =>
                coerce_default(schema, input_field.type_annotation(), default_value, &field_path)?,

            (None, None) if !input_field.type_annotation().nullable() =>
                return Err(InputCoercionError::NullValueForNonNull {
                    expected_type: input_field.type_annotation().to_string(),
                    path: field_path,
                }),

            (None, None) => continue,
        };
        coerced.insert(field_name.to_string(), coerced_value);
    }
    Ok(Value::Object(coerced))
}

fn invalid_value(
    named_annot: &NamedTypeAnnotation,
    raw_value: &serde_json::Value,
    path: &str,
) -> InputCoercionError {
    InputCoercionError::InvalidValue {
        expected_type: named_annot.type_name().to_string(),
        found: raw_value.to_string(),
        path: path.to_string(),
    }
}
