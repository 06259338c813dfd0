use crate::selection::FieldSelection;
use crate::selection::Selection;
use crate::selection::SelectionError;
use crate::selection::SelectionSet;
use crate::Value;

type Result<T> = std::result::Result<T, SelectionError>;

#[test]
fn parse_distinguishes_leaf_and_composite_fields() -> Result<()> {
    let set = SelectionSet::parse("{ id friends { name } }")?;
    let fields: Vec<&FieldSelection> = set.selections()
        .iter()
        .filter_map(Selection::as_field)
        .collect();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name(), "id");
    assert!(fields[0].selection_set().is_none());
    assert_eq!(fields[1].name(), "friends");
    assert_eq!(fields[1].selection_set().map(SelectionSet::len), Some(1));
    Ok(())
}

#[test]
fn parse_reads_aliases_and_arguments() -> Result<()> {
    let set = SelectionSet::parse(r#"{ big: picture(size: 200, format: "png") }"#)?;
    let Some(field) = set.selections()[0].as_field() else {
        panic!("Expected a field selection");
    };

    assert_eq!(field.response_key(), "big");
    assert_eq!(field.name(), "picture");
    assert_eq!(field.arguments(), &[
        ("size".to_string(), Value::Int(200)),
        ("format".to_string(), Value::String("png".to_string())),
    ]);
    Ok(())
}

#[test]
fn parse_rejects_named_operations() {
    let result = SelectionSet::parse("query Q { id }");
    assert_eq!(result, Err(SelectionError::UnsupportedDocument));
}

#[test]
fn parse_reports_syntax_errors() {
    let result = SelectionSet::parse("{ id ");
    assert!(matches!(result, Err(SelectionError::ParseError(_))));
}

#[test]
fn printed_documents_parse_back_to_the_same_selection_set() -> Result<()> {
    let set = SelectionSet::parse(r#"
        {
          __typename
          user(id: 4) {
            id
            ... on Admin { permissions }
          }
        }
    "#)?;

    let printed = set.to_string();
    assert!(printed.contains("user(id: 4) {"));
    assert!(printed.contains("... on Admin {"));
    assert_eq!(SelectionSet::parse(&printed)?, set);
    Ok(())
}
