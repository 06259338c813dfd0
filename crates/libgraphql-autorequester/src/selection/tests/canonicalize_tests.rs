use crate::schema::Schema;
use crate::selection::canonicalize;
use crate::selection::SelectionError;
use crate::selection::SelectionSet;

type Result<T> = std::result::Result<T, SelectionError>;

fn schema() -> Schema {
    Schema::builder()
        .load_str(None, r#"
            interface Node { id: ID! }
            interface Named { name: String }

            type User implements Node & Named {
              id: ID!
              name: String
              email: String
            }

            type Bot implements Node {
              id: ID!
              version: Int
            }

            union SearchResult = User | Bot

            type Query {
              node: Node
              search: [SearchResult]
            }
        "#)
        .unwrap()
        .build()
        .unwrap()
}

fn parse(content: &str) -> SelectionSet {
    SelectionSet::parse(content).unwrap()
}

#[test]
fn interface_root_keeps_its_own_fields_at_top_level() -> Result<()> {
    let canonical = canonicalize(
        &schema(),
        "Node",
        "User",
        &parse("{ id name email __typename }"),
    )?;
    assert_eq!(
        canonical,
        parse("{ id ... on Named { name } __typename ... on User { email } }"),
    );
    Ok(())
}

#[test]
fn union_root_wraps_interface_fields_in_interface_fragments() -> Result<()> {
    let canonical = canonicalize(
        &schema(),
        "SearchResult",
        "User",
        &parse("{ id name email }"),
    )?;
    assert_eq!(
        canonical,
        parse("{ ... on Node { id } ... on Named { name } ... on User { email } }"),
    );
    Ok(())
}

#[test]
fn nested_selections_travel_with_their_field() -> Result<()> {
    let schema = Schema::builder()
        .load_str(None, r#"
            interface Pet { name: String }
            type Dog implements Pet { name: String owner: Person }
            type Person { name: String }
            type Query { pet: Pet }
        "#)
        .unwrap()
        .build()
        .unwrap();

    let canonical = canonicalize(&schema, "Pet", "Dog", &parse("{ owner { name } }"))?;
    assert_eq!(canonical, parse("{ ... on Dog { owner { name } } }"));
    Ok(())
}

#[test]
fn same_root_and_concrete_type_is_a_no_op() -> Result<()> {
    let set = parse("{ id ... on User { name } }");
    assert_eq!(canonicalize(&schema(), "User", "User", &set)?, set);
    Ok(())
}

#[test]
fn empty_selection_set_stays_empty() -> Result<()> {
    assert!(canonicalize(&schema(), "Node", "Bot", &SelectionSet::new())?.is_empty());
    Ok(())
}

#[test]
fn rejects_inline_fragments() {
    let result = canonicalize(&schema(), "Node", "User", &parse("{ ... on User { id } }"));
    assert!(matches!(result, Err(SelectionError::UnsupportedSelection { .. })));
}

#[test]
fn rejects_unknown_concrete_types() {
    let result = canonicalize(&schema(), "Node", "Robot", &parse("{ id }"));
    assert_eq!(result, Err(SelectionError::UnknownCompositeType {
        type_name: "Robot".to_string(),
    }));
}
