use crate::ast;
use crate::types::TypeAnnotation;

fn field_annotation(type_str: &str) -> TypeAnnotation {
    let doc = ast::schema::parse(&format!("type Query {{ f: {type_str} }}")).unwrap();
    let Some(ast::schema::Definition::TypeDefinition(
        ast::schema::TypeDefinition::Object(obj_def),
    )) = doc.definitions.first() else {
        panic!("Expected an object type definition");
    };
    TypeAnnotation::from_ast_type(&obj_def.fields[0].field_type)
}

#[test]
fn named_annotation_nullability() {
    assert!(field_annotation("Int").nullable());
    assert!(!field_annotation("Int!").nullable());
}

#[test]
fn list_annotation_tracks_each_level() {
    let annot = field_annotation("[[User!]]!");
    assert!(!annot.nullable());

    let outer = annot.as_list_annotation().unwrap();
    let inner = outer.inner_type().as_list_annotation().unwrap();
    assert!(inner.nullable());

    let named = inner.inner_type().as_named_annotation().unwrap();
    assert_eq!(named.type_name(), "User");
    assert!(!named.nullable());
    assert_eq!(annot.innermost_named_type_annotation().type_name(), "User");
}
