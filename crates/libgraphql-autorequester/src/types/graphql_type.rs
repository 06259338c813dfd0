use crate::types::EnumType;
use crate::types::Field;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectOrInterfaceTypeTrait;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use indexmap::IndexMap;

/// Represents a defined GraphQL type
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Bool,
    Enum(EnumType),
    Float,
    ID,
    InputObject(InputObjectType),
    Int,
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    String,
    Union(UnionType),
}
impl GraphQLType {
    pub fn as_enum(&self) -> Option<&EnumType> {
        if let Self::Enum(enum_t) = self { Some(enum_t) } else { None }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        if let Self::InputObject(input_t) = self { Some(input_t) } else { None }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        if let Self::Interface(iface_t) = self { Some(iface_t) } else { None }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        if let Self::Object(obj_t) = self { Some(obj_t) } else { None }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        if let Self::Union(union_t) = self { Some(union_t) } else { None }
    }

    /// The fields selectable on this type. Only objects and interfaces
    /// declare fields of their own; unions only offer `__typename`.
    pub fn fields(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            Self::Interface(iface_t) => Some(iface_t.fields()),
            Self::Object(obj_t) => Some(obj_t.fields()),
            _ => None,
        }
    }

    /// Interfaces and unions.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Objects, interfaces and unions.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Object(_) | Self::Union(_))
    }

    /// Scalars (builtin or custom) and enums.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Enum(_)
                | Self::Float
                | Self::ID
                | Self::Int
                | Self::Scalar(_)
                | Self::String
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Bool => "Boolean",
            Self::Enum(t) => t.name(),
            Self::Float => "Float",
            Self::ID => "ID",
            Self::InputObject(t) => t.name(),
            Self::Int => "Int",
            Self::Interface(t) => t.name(),
            Self::Object(t) => t.name(),
            Self::Scalar(t) => t.name(),
            Self::String => "String",
            Self::Union(t) => t.name(),
        }
    }

    pub fn type_kind(&self) -> GraphQLTypeKind {
        match self {
            Self::Bool => GraphQLTypeKind::Bool,
            Self::Enum(_) => GraphQLTypeKind::Enum,
            Self::Float => GraphQLTypeKind::Float,
            Self::ID => GraphQLTypeKind::ID,
            Self::InputObject(_) => GraphQLTypeKind::InputObject,
            Self::Int => GraphQLTypeKind::Int,
            Self::Interface(_) => GraphQLTypeKind::Interface,
            Self::Object(_) => GraphQLTypeKind::Object,
            Self::Scalar(_) => GraphQLTypeKind::Scalar,
            Self::String => GraphQLTypeKind::String,
            Self::Union(_) => GraphQLTypeKind::Union,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphQLTypeKind {
    Bool,
    Enum,
    Float,
    ID,
    InputObject,
    Int,
    Interface,
    Object,
    Scalar,
    String,
    Union,
}
impl std::fmt::Display for GraphQLTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Bool => "Boolean",
            Self::Enum => "Enum",
            Self::Float => "Float",
            Self::ID => "ID",
            Self::InputObject => "InputObject",
            Self::Int => "Int",
            Self::Interface => "Interface",
            Self::Object => "Object",
            Self::Scalar => "Scalar",
            Self::String => "String",
            Self::Union => "Union",
        })
    }
}
