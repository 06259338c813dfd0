use crate::coercion::arguments_cache_key;
use crate::coercion::coerce_arguments;
use crate::coercion::InputCoercionError;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::ObjectOrInterfaceTypeTrait;
use crate::Value;
use indexmap::IndexMap;
use serde_json::json;

type Result<T> = std::result::Result<T, InputCoercionError>;

fn schema() -> Schema {
    Schema::builder()
        .load_str(None, r#"
            enum Order { ASC DESC }
            scalar JSON

            input Filter {
              kind: String!
              limit: Int = 5
              tags: [String!]
            }

            type Query {
              items(
                first: Int = 10
                ratio: Float = 1
                order: Order
                filter: Filter
                id: ID
                extra: JSON
              ): [Int]
              node(id: ID!): Int
              tagged(tags: [String]): Int
            }
        "#)
        .unwrap()
        .build()
        .unwrap()
}

fn field<'a>(schema: &'a Schema, field_name: &str) -> &'a Field {
    schema.query_type().unwrap().field(field_name).unwrap()
}

fn raw(json: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    json.as_object().cloned().unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn absent_arguments_take_declared_defaults() -> Result<()> {
        let schema = schema();
        let coerced = coerce_arguments(&schema, field(&schema, "items"), &raw(json!({})))?;
        assert_eq!(coerced, vec![
            ("first".to_string(), Value::Int(10)),
            ("ratio".to_string(), Value::Float(1.0)),
        ]);
        Ok(())
    }

    #[test]
    fn explicit_null_overrides_a_default() -> Result<()> {
        let schema = schema();
        let coerced = coerce_arguments(
            &schema,
            field(&schema, "items"),
            &raw(json!({ "first": null })),
        )?;
        assert_eq!(coerced[0], ("first".to_string(), Value::Null));
        Ok(())
    }

    #[test]
    fn input_object_fields_take_defaults() -> Result<()> {
        let schema = schema();
        let coerced = coerce_arguments(
            &schema,
            field(&schema, "items"),
            &raw(json!({ "filter": { "kind": "book" } })),
        )?;
        let filter = coerced.iter()
            .find(|(name, _)| name == "filter")
            .map(|(_, value)| value.clone());
        assert_eq!(filter, Some(Value::Object(IndexMap::from([
            ("kind".to_string(), Value::String("book".to_string())),
            ("limit".to_string(), Value::Int(5)),
        ]))));
        Ok(())
    }
}

mod scalars {
    use super::*;

    #[test]
    fn enum_and_id_coercion() -> Result<()> {
        let schema = schema();
        let coerced = coerce_arguments(
            &schema,
            field(&schema, "items"),
            &raw(json!({ "order": "DESC", "id": 42 })),
        )?;
        assert!(coerced.contains(&("order".to_string(), Value::Enum("DESC".to_string()))));
        assert!(coerced.contains(&("id".to_string(), Value::String("42".to_string()))));
        Ok(())
    }

    #[test]
    fn custom_scalars_pass_through() -> Result<()> {
        let schema = schema();
        let coerced = coerce_arguments(
            &schema,
            field(&schema, "items"),
            &raw(json!({ "extra": { "any": [1, "two"] } })),
        )?;
        assert!(coerced.contains(&(
            "extra".to_string(),
            Value::from_json(&json!({ "any": [1, "two"] })),
        )));
        Ok(())
    }

    #[test]
    fn single_value_is_wrapped_into_a_list() -> Result<()> {
        let schema = schema();
        let coerced = coerce_arguments(
            &schema,
            field(&schema, "tagged"),
            &raw(json!({ "tags": "new" })),
        )?;
        assert_eq!(coerced, vec![(
            "tags".to_string(),
            Value::List(vec![Value::String("new".to_string())]),
        )]);
        Ok(())
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_argument() {
        let schema = schema();
        assert_eq!(
            coerce_arguments(&schema, field(&schema, "node"), &raw(json!({ "nope": 1 }))),
            Err(InputCoercionError::UnknownArgument {
                argument_name: "nope".to_string(),
                field_name: "node".to_string(),
            }),
        );
    }

    #[test]
    fn missing_required_argument() {
        let schema = schema();
        assert_eq!(
            coerce_arguments(&schema, field(&schema, "node"), &raw(json!({}))),
            Err(InputCoercionError::MissingRequiredArgument {
                argument_name: "id".to_string(),
                field_name: "node".to_string(),
            }),
        );
    }

    #[test]
    fn null_for_non_null_argument() {
        let schema = schema();
        assert!(matches!(
            coerce_arguments(&schema, field(&schema, "node"), &raw(json!({ "id": null }))),
            Err(InputCoercionError::NullValueForNonNull { .. }),
        ));
    }

    #[test]
    fn int_out_of_32_bit_range() {
        let schema = schema();
        assert!(matches!(
            coerce_arguments(
                &schema,
                field(&schema, "items"),
                &raw(json!({ "first": 1_i64 << 40 })),
            ),
            Err(InputCoercionError::InvalidValue { path, .. }) if path == "first",
        ));
    }

    #[test]
    fn undeclared_enum_value() {
        let schema = schema();
        assert!(matches!(
            coerce_arguments(&schema, field(&schema, "items"), &raw(json!({ "order": "UP" }))),
            Err(InputCoercionError::InvalidValue { .. }),
        ));
    }

    #[test]
    fn nested_errors_report_their_path() {
        let schema = schema();
        assert_eq!(
            coerce_arguments(
                &schema,
                field(&schema, "items"),
                &raw(json!({ "filter": { "kind": "x", "tags": ["a", null] } })),
            ),
            Err(InputCoercionError::NullValueForNonNull {
                expected_type: "String!".to_string(),
                path: "filter.tags[1]".to_string(),
            }),
        );
    }

    #[test]
    fn unknown_input_field() {
        let schema = schema();
        assert!(matches!(
            coerce_arguments(
                &schema,
                field(&schema, "items"),
                &raw(json!({ "filter": { "kind": "x", "color": "red" } })),
            ),
            Err(InputCoercionError::UnknownInputField { input_field_name, .. })
                if input_field_name == "color",
        ));
    }
}

mod cache_keys {
    use super::*;

    #[test]
    fn object_entry_order_does_not_change_the_key() -> Result<()> {
        let schema = schema();
        let items = field(&schema, "items");
        let left = coerce_arguments(
            &schema,
            items,
            &raw(json!({ "filter": { "kind": "x", "limit": 2 } })),
        )?;
        let right = coerce_arguments(
            &schema,
            items,
            &raw(json!({ "filter": { "limit": 2, "kind": "x" } })),
        )?;
        assert_eq!(arguments_cache_key("items", &left), arguments_cache_key("items", &right));
        Ok(())
    }

    #[test]
    fn defaults_hash_like_explicit_values() -> Result<()> {
        let schema = schema();
        let items = field(&schema, "items");
        let implicit = coerce_arguments(&schema, items, &raw(json!({})))?;
        let explicit = coerce_arguments(&schema, items, &raw(json!({ "first": 10, "ratio": 1.0 })))?;
        assert_eq!(arguments_cache_key("items", &implicit), arguments_cache_key("items", &explicit));
        Ok(())
    }

    #[test]
    fn keys_are_prefixed_with_the_field_name() {
        let key = arguments_cache_key("items", &[("first".to_string(), Value::Int(1))]);
        let different = arguments_cache_key("items", &[("first".to_string(), Value::Int(2))]);
        assert!(key.starts_with("items_"));
        assert_eq!(key.len(), "items_".len() + 64);
        assert_ne!(key, different);
    }
}
