use crate::fragment_typemap::FragmentTypeMap;
use crate::fragment_typemap::FragmentTypeMapBuildError;
use crate::fragment_typemap::FragmentTypeMapBuilder;
use crate::schema::Schema;
use crate::selection::SelectionSet;
use crate::types::GraphQLTypeKind;

type Result<T> = std::result::Result<T, FragmentTypeMapBuildError>;

fn setup_schema() -> Schema {
    Schema::builder()
        .load_str(None, r#"
            interface Node { id: ID! }

            type User implements Node {
              id: ID!
              name: String
              bestFriend: User
              posts: [Post]
            }

            type Post implements Node {
              id: ID!
              title: String
            }

            union Feed = User | Post
            enum Color { RED }

            type Query { node: Node feed: [Feed] }
        "#)
        .unwrap()
        .build()
        .unwrap()
}

fn build(schema: &Schema, content: &str) -> Result<FragmentTypeMap> {
    FragmentTypeMapBuilder::new(schema).load_str(None, content)?.build()
}

fn parse(content: &str) -> SelectionSet {
    SelectionSet::parse(content).unwrap()
}

mod basics {
    use super::*;

    #[test]
    fn empty_document_builds_an_empty_typemap() -> Result<()> {
        let schema = setup_schema();
        assert!(build(&schema, "")?.is_empty());
        Ok(())
    }

    #[test]
    fn fragments_on_the_same_type_are_merged() -> Result<()> {
        let schema = setup_schema();
        let typemap = build(&schema, r#"
            fragment A on User { name }
            fragment B on User { bestFriend { name } }
            fragment C on User { bestFriend { posts { title } } }
        "#)?;
        assert_eq!(
            typemap.get("User"),
            Some(&parse("{ name bestFriend { name posts { title } } }")),
        );
        Ok(())
    }

    #[test]
    fn interface_fields_are_declared_on_the_interface() -> Result<()> {
        let schema = setup_schema();
        let typemap = build(&schema, "fragment N on Node { id }")?;
        assert_eq!(typemap.get("Node"), Some(&parse("{ id }")));
        assert_eq!(typemap.get("User"), None);
        Ok(())
    }

    #[test]
    fn spreads_are_inlined_by_substitution() -> Result<()> {
        let schema = setup_schema();
        let typemap = build(&schema, r#"
            fragment UserPreload on User { name bestFriend { ...FriendFields } }
            fragment FriendFields on User { name posts { title } }
        "#)?;
        assert_eq!(
            typemap.get("User"),
            Some(&parse("{ name bestFriend { name posts { title } } posts { title } }")),
        );
        Ok(())
    }

    #[test]
    fn sources_are_validated_together() -> Result<()> {
        let schema = setup_schema();
        let typemap = FragmentTypeMapBuilder::new(&schema)
            .load_str(None, "fragment A on User { ...B }")?
            .load_str(None, "fragment B on User { name }")?
            .build()?;
        assert_eq!(typemap.get("User"), Some(&parse("{ name }")));
        Ok(())
    }
}

mod errors {
    use super::*;

    #[test]
    fn operations_are_rejected() {
        let schema = setup_schema();
        assert!(matches!(
            build(&schema, "fragment A on User { name } query { node { id } }"),
            Err(FragmentTypeMapBuildError::NonFragmentDefinition { .. }),
        ));
    }

    #[test]
    fn unknown_type_condition() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on Robot { id }"),
            Err(FragmentTypeMapBuildError::UnknownTypeCondition {
                fragment_name: "A".to_string(),
                type_name: "Robot".to_string(),
            }),
        );
    }

    #[test]
    fn union_type_condition() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on Feed { __typename }"),
            Err(FragmentTypeMapBuildError::UnionTypeCondition {
                fragment_name: "A".to_string(),
                type_name: "Feed".to_string(),
            }),
        );
    }

    #[test]
    fn non_composite_type_condition() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on Color { x }"),
            Err(FragmentTypeMapBuildError::NonCompositeTypeCondition {
                fragment_name: "A".to_string(),
                type_kind: GraphQLTypeKind::Enum,
                type_name: "Color".to_string(),
            }),
        );
    }

    #[test]
    fn aliases_are_rejected_at_any_depth() {
        let schema = setup_schema();
        assert!(matches!(
            build(&schema, "fragment A on User { bestFriend { handle: name } }"),
            Err(FragmentTypeMapBuildError::AliasNotAllowed { alias, .. }) if alias == "handle",
        ));
    }

    #[test]
    fn fields_inherited_from_interfaces_are_rejected() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on User { id name }"),
            Err(FragmentTypeMapBuildError::InterfaceFieldNotAllowed {
                field_name: "id".to_string(),
                fragment_name: "A".to_string(),
                interface_name: "Node".to_string(),
                type_name: "User".to_string(),
            }),
        );
    }

    #[test]
    fn inline_fragments_are_rejected() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on Node { ... on User { name } }"),
            Err(FragmentTypeMapBuildError::InlineFragmentNotAllowed {
                fragment_name: "A".to_string(),
            }),
        );
    }

    #[test]
    fn undefined_fields_are_rejected() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on User { bestFriend { age } }"),
            Err(FragmentTypeMapBuildError::UndefinedField {
                field_name: "age".to_string(),
                fragment_name: "A".to_string(),
                type_name: "User".to_string(),
            }),
        );
    }

    #[test]
    fn undefined_spreads_are_rejected() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on User { ...Missing }"),
            Err(FragmentTypeMapBuildError::UndefinedFragmentReference {
                fragment_name: "A".to_string(),
                undefined_fragment: "Missing".to_string(),
            }),
        );
    }

    #[test]
    fn spread_cycles_are_reported_in_normalized_form() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, r#"
                fragment C on User { ...A }
                fragment B on User { ...C }
                fragment A on User { ...B }
            "#),
            Err(FragmentTypeMapBuildError::FragmentCycleDetected {
                cycle_path: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "A".to_string(),
                ],
            }),
        );
    }

    #[test]
    fn duplicate_fragment_names_are_rejected() {
        let schema = setup_schema();
        assert_eq!(
            build(&schema, "fragment A on User { name } fragment A on Post { title }"),
            Err(FragmentTypeMapBuildError::DuplicateFragmentDefinition {
                fragment_name: "A".to_string(),
            }),
        );
    }

    #[test]
    fn syntax_errors_name_the_source() {
        let schema = setup_schema();
        assert!(matches!(
            build(&schema, "fragment A on User {"),
            Err(FragmentTypeMapBuildError::ParseError { .. }),
        ));
    }
}
