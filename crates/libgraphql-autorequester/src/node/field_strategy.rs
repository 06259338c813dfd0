use crate::schema::Schema;
use crate::types::Field;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

pub(crate) type FieldStrategies = IndexMap<String, FieldStrategy>;

/// How a field of an object type is resolved, decided once per type from
/// the field's declared output type.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FieldStrategy {
    /// An interface or union, nullable or not.
    Abstract {
        type_name: String,
    },

    /// A list (nested `depth` levels deep) of object, interface or union
    /// values.
    CompositeList {
        depth: usize,
        element_type: String,
    },

    /// Scalars, enums and lists of either.
    Leaf,

    Object {
        nullable: bool,
        type_name: String,
    },

    Unsupported {
        output_type: String,
    },
}
impl FieldStrategy {
    pub fn for_field(schema: &Schema, field: &Field) -> Self {
        let annotation = field.type_annotation();
        let named_annotation = annotation.innermost_named_type_annotation();
        let unsupported = || Self::Unsupported {
            output_type: annotation.to_string(),
        };
        let Some(output_type) = named_annotation.graphql_type(schema) else {
            return unsupported();
        };

        if output_type.is_leaf() {
            return Self::Leaf;
        }
        if !output_type.is_composite() {
            return unsupported();
        }

        match annotation {
            TypeAnnotation::List(_) => Self::CompositeList {
                depth: list_depth(annotation),
                element_type: output_type.name().to_string(),
            },

            TypeAnnotation::Named(_) if output_type.is_abstract() => Self::Abstract {
                type_name: output_type.name().to_string(),
            },

            TypeAnnotation::Named(named) => Self::Object {
                nullable: named.nullable(),
                type_name: output_type.name().to_string(),
            },
        }
    }

    pub fn for_object_type(schema: &Schema, object_type: &ObjectType) -> FieldStrategies {
        object_type.fields()
            .iter()
            .map(|(field_name, field)| {
                (field_name.to_string(), Self::for_field(schema, field))
            })
            .collect()
    }
}

fn list_depth(annotation: &TypeAnnotation) -> usize {
    match annotation {
        TypeAnnotation::List(list_annot) => 1 + list_depth(list_annot.inner_type()),
        TypeAnnotation::Named(_) => 0,
    }
}
