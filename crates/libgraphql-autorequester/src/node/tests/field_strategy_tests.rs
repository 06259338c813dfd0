use crate::node::FieldStrategy;
use crate::test::schema;

#[test]
fn strategies_follow_declared_output_types() {
    let schema = schema(r#"
        scalar Date
        enum Color { RED GREEN }

        interface Pet { name: String }
        type Dog implements Pet { name: String }
        union SearchResult = Dog

        type Query {
            count: Int
            colors: [Color!]!
            born: Date
            dog: Dog!
            maybeDog: Dog
            pet: Pet!
            search: SearchResult
            pets: [Pet]
            grid: [[Dog!]!]
        }
    "#);
    let strategies = FieldStrategy::for_object_type(
        &schema,
        schema.object_type("Query").unwrap(),
    );

    let expected = [
        ("count", FieldStrategy::Leaf),
        ("colors", FieldStrategy::Leaf),
        ("born", FieldStrategy::Leaf),
        ("dog", FieldStrategy::Object {
            nullable: false,
            type_name: "Dog".to_string(),
        }),
        ("maybeDog", FieldStrategy::Object {
            nullable: true,
            type_name: "Dog".to_string(),
        }),
        ("pet", FieldStrategy::Abstract {
            type_name: "Pet".to_string(),
        }),
        ("search", FieldStrategy::Abstract {
            type_name: "SearchResult".to_string(),
        }),
        ("pets", FieldStrategy::CompositeList {
            depth: 1,
            element_type: "Pet".to_string(),
        }),
        ("grid", FieldStrategy::CompositeList {
            depth: 2,
            element_type: "Dog".to_string(),
        }),
    ];
    for (field_name, strategy) in expected {
        assert_eq!(strategies.get(field_name), Some(&strategy), "field `{field_name}`");
    }
}
