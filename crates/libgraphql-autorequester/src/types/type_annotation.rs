use crate::ast;
use crate::schema::Schema;
use crate::types::GraphQLType;

/// Represents the annotated type for a [`Field`](crate::types::Field),
/// [`Parameter`](crate::types::Parameter), or
/// [`InputField`](crate::types::InputField).
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}
impl TypeAnnotation {
    /// Unwrap the [`ListTypeAnnotation`] if this annotation is one.
    pub fn as_list_annotation(&self) -> Option<&ListTypeAnnotation> {
        if let Self::List(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Unwrap the [`NamedTypeAnnotation`] if this annotation is one.
    pub fn as_named_annotation(&self) -> Option<&NamedTypeAnnotation> {
        if let Self::Named(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    pub(crate) fn from_ast_type(ast_type: &ast::schema::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::schema::Type, nullable: bool) -> Self {
        match ast_type {
            ast::schema::Type::ListType(inner) =>
                Self::List(ListTypeAnnotation {
                    inner_type: Box::new(Self::from_ast_type_impl(inner, true)),
                    nullable,
                }),

            ast::schema::Type::NamedType(name) =>
                Self::Named(NamedTypeAnnotation {
                    nullable,
                    type_name: name.to_string(),
                }),

            ast::schema::Type::NonNullType(inner) =>
                Self::from_ast_type_impl(inner, false),
        }
    }

    /// Recursively unwrap this [`TypeAnnotation`] and return the inner-most
    /// [`NamedTypeAnnotation`] from it.
    pub fn innermost_named_type_annotation(&self) -> &NamedTypeAnnotation {
        match self {
            TypeAnnotation::List(ListTypeAnnotation { inner_type, .. })
                => inner_type.innermost_named_type_annotation(),
            TypeAnnotation::Named(named_annot)
                => named_annot,
        }
    }

    /// Indicates if this [`TypeAnnotation`] is [nullable or
    /// non-nullable](https://spec.graphql.org/October2021/#sec-Non-Null).
    pub fn nullable(&self) -> bool {
        match self {
            TypeAnnotation::List(ListTypeAnnotation { nullable, .. }) => *nullable,
            TypeAnnotation::Named(NamedTypeAnnotation { nullable, .. }) => *nullable,
        }
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(ListTypeAnnotation { inner_type, nullable }) => {
                write!(f, "[{inner_type}]")?;
                if !nullable {
                    f.write_str("!")?;
                }
                Ok(())
            },
            Self::Named(NamedTypeAnnotation { nullable, type_name }) => {
                f.write_str(type_name)?;
                if !nullable {
                    f.write_str("!")?;
                }
                Ok(())
            },
        }
    }
}
impl std::convert::From<ListTypeAnnotation> for TypeAnnotation {
    fn from(value: ListTypeAnnotation) -> Self {
        Self::List(value)
    }
}
impl std::convert::From<NamedTypeAnnotation> for TypeAnnotation {
    fn from(value: NamedTypeAnnotation) -> Self {
        Self::Named(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListTypeAnnotation {
    pub(crate) inner_type: Box<TypeAnnotation>,
    pub(crate) nullable: bool,
}
impl ListTypeAnnotation {
    pub fn inner_type(&self) -> &TypeAnnotation {
        &self.inner_type
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeAnnotation {
    pub(crate) nullable: bool,
    pub(crate) type_name: String,
}
impl NamedTypeAnnotation {
    /// Look the annotated type up in `schema`. Returns `None` only for a
    /// dangling name, which a built [`Schema`] never contains.
    pub fn graphql_type<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Option<&'schema GraphQLType> {
        schema.get_type(self.type_name.as_str())
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }
}
