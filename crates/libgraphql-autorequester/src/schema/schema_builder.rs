use crate::ast;
use crate::file_reader;
use crate::schema::Schema;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectOrInterfaceTypeData;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Utility for building a [Schema] from one or more SDL sources.
#[derive(Debug)]
pub struct SchemaBuilder {
    extensions: Vec<PendingExtension>,
    query_type: Option<String>,
    str_load_counter: u16,
    types: IndexMap<String, GraphQLType>,
}
impl SchemaBuilder {
    pub fn build(mut self) -> Result<Schema> {
        for ext in std::mem::take(&mut self.extensions) {
            self.merge_type_extension(ext)?;
        }

        self.check_type_references()?;

        let query_type = self.query_type.take().unwrap_or_else(|| "Query".to_string());
        match self.types.get(query_type.as_str()) {
            Some(GraphQLType::Object(_)) => (),
            Some(non_obj_type) =>
                return Err(SchemaBuildError::InvalidOperationType {
                    operation: "query".to_string(),
                    type_kind: non_obj_type.type_kind(),
                    type_name: query_type,
                }),
            None => return Err(SchemaBuildError::NoQueryOperationTypeDefined),
        }

        Ok(Schema {
            query_type,
            types: self.types,
        })
    }

    /// Every referenced type name must resolve: field and argument types,
    /// implemented interfaces (which must be interfaces) and union members
    /// (which must be object types).
    fn check_type_references(&self) -> Result<()> {
        let type_exists = |referencing_type: &str, annot: &TypeAnnotation| {
            let type_name = annot.innermost_named_type_annotation().type_name();
            if self.types.contains_key(type_name) {
                Ok(())
            } else {
                Err(SchemaBuildError::UndefinedTypeReference {
                    referencing_type: referencing_type.to_string(),
                    type_name: type_name.to_string(),
                })
            }
        };

        for graphql_type in self.types.values() {
            match graphql_type {
                GraphQLType::Object(ObjectType(data))
                    | GraphQLType::Interface(InterfaceType(data)) => {
                    for field in data.fields.values() {
                        type_exists(&data.name, field.type_annotation())?;
                        for param in field.parameters().values() {
                            type_exists(&data.name, param.type_annotation())?;
                        }
                    }
                    for iface_name in &data.interfaces {
                        match self.types.get(iface_name) {
                            Some(GraphQLType::Interface(_)) => (),
                            Some(other) =>
                                return Err(SchemaBuildError::InvalidImplementsType {
                                    type_kind: other.type_kind(),
                                    type_name: data.name.to_string(),
                                    interface_name: iface_name.to_string(),
                                }),
                            None =>
                                return Err(SchemaBuildError::UndefinedTypeReference {
                                    referencing_type: data.name.to_string(),
                                    type_name: iface_name.to_string(),
                                }),
                        }
                    }
                },

                GraphQLType::Union(union_t) => {
                    for member in union_t.members() {
                        match self.types.get(member) {
                            Some(GraphQLType::Object(_)) => (),
                            Some(other) =>
                                return Err(SchemaBuildError::InvalidUnionMemberType {
                                    member_name: member.to_string(),
                                    type_kind: other.type_kind(),
                                    union_name: union_t.name().to_string(),
                                }),
                            None =>
                                return Err(SchemaBuildError::UndefinedTypeReference {
                                    referencing_type: union_t.name().to_string(),
                                    type_name: member.to_string(),
                                }),
                        }
                    }
                },

                GraphQLType::InputObject(input_t) => {
                    for input_field in input_t.fields().values() {
                        type_exists(input_t.name(), input_field.type_annotation())?;
                    }
                },

                _ => (),
            }
        }

        Ok(())
    }

    fn fields_from_ast(
        type_name: &str,
        ast_fields: &[ast::schema::Field],
        fields: &mut IndexMap<String, Field>,
    ) -> Result<()> {
        for ast_field in ast_fields {
            if fields.contains_key(ast_field.name.as_str()) {
                return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                    field_name: ast_field.name.to_string(),
                    type_name: type_name.to_string(),
                });
            }
            fields.insert(ast_field.name.to_string(), Field::from_ast(ast_field));
        }
        Ok(())
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_files(vec![file_path])
    }

    pub fn load_files(mut self, file_paths: Vec<impl AsRef<Path>>) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = file_reader::read_content(file_path)
                .map_err(SchemaBuildError::SchemaFileReadError)?;
            self = self.load_str(Some(file_path.to_path_buf()), file_content.as_str())?;
        }
        Ok(self)
    }

    pub fn load_str(mut self, file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc = ast::schema::parse(content)
            .map_err(|err| SchemaBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?;

        for def in ast_doc.definitions {
            self.visit_definition(def)?;
        }

        Ok(self)
    }

    fn merge_type_extension(&mut self, ext: PendingExtension) -> Result<()> {
        let (type_name, ext_fields, ext_interfaces, expected_kind) = match &ext {
            PendingExtension::Interface(ext) =>
                (&ext.name, &ext.fields, vec![], GraphQLTypeKind::Interface),
            PendingExtension::Object(ext) =>
                (&ext.name, &ext.fields, ext.implements_interfaces.clone(), GraphQLTypeKind::Object),
        };

        let data = match (self.types.get_mut(type_name.as_str()), expected_kind) {
            (Some(GraphQLType::Object(ObjectType(data))), GraphQLTypeKind::Object)
                | (Some(GraphQLType::Interface(InterfaceType(data))), GraphQLTypeKind::Interface) =>
                data,

            (Some(other), _) =>
                return Err(SchemaBuildError::InvalidExtensionType {
                    type_kind: other.type_kind(),
                    type_name: type_name.to_string(),
                }),

            (None, _) =>
                return Err(SchemaBuildError::ExtensionOfUndefinedType {
                    type_name: type_name.to_string(),
                }),
        };

        Self::fields_from_ast(type_name, ext_fields, &mut data.fields)?;
        for iface_name in ext_interfaces {
            if !data.interfaces.contains(&iface_name) {
                data.interfaces.push(iface_name);
            }
        }
        Ok(())
    }

    pub fn new() -> Self {
        let types = IndexMap::from([
            ("Boolean".to_string(), GraphQLType::Bool),
            ("Float".to_string(), GraphQLType::Float),
            ("ID".to_string(), GraphQLType::ID),
            ("Int".to_string(), GraphQLType::Int),
            ("String".to_string(), GraphQLType::String),
        ]);

        Self {
            extensions: vec![],
            query_type: None,
            str_load_counter: 0,
            types,
        }
    }

    fn set_operation_type(
        slot: &mut Option<String>,
        operation: &str,
        type_name: Option<String>,
    ) -> Result<()> {
        let Some(type_name) = type_name else {
            return Ok(());
        };
        if slot.is_some() {
            return Err(SchemaBuildError::DuplicateOperationDefinition {
                operation: operation.to_string(),
            });
        }
        *slot = Some(type_name);
        Ok(())
    }

    fn visit_definition(&mut self, def: ast::schema::Definition) -> Result<()> {
        match def {
            ast::schema::Definition::SchemaDefinition(schema_def) => {
                // Only the query root is ever planned against.
                Self::set_operation_type(&mut self.query_type, "query", schema_def.query)
            },

            ast::schema::Definition::TypeDefinition(type_def) =>
                self.visit_type_definition(type_def),

            ast::schema::Definition::TypeExtension(
                ast::schema::TypeExtension::Object(ext),
            ) => {
                self.extensions.push(PendingExtension::Object(ext));
                Ok(())
            },

            ast::schema::Definition::TypeExtension(
                ast::schema::TypeExtension::Interface(ext),
            ) => {
                self.extensions.push(PendingExtension::Interface(ext));
                Ok(())
            },

            ast::schema::Definition::TypeExtension(other_ext) =>
                Err(SchemaBuildError::UnsupportedTypeExtension {
                    type_name: type_extension_name(&other_ext).to_string(),
                }),

            // Directives carry no meaning for request planning.
            ast::schema::Definition::DirectiveDefinition(_) => Ok(()),
        }
    }

    fn visit_type_definition(&mut self, type_def: ast::schema::TypeDefinition) -> Result<()> {
        let graphql_type = match type_def {
            ast::schema::TypeDefinition::Scalar(def) =>
                GraphQLType::Scalar(ScalarType { name: def.name }),

            ast::schema::TypeDefinition::Object(def) => {
                let mut fields = IndexMap::new();
                Self::fields_from_ast(&def.name, &def.fields, &mut fields)?;
                GraphQLType::Object(ObjectType(ObjectOrInterfaceTypeData {
                    fields,
                    interfaces: def.implements_interfaces,
                    name: def.name,
                }))
            },

            ast::schema::TypeDefinition::Interface(def) => {
                let mut fields = IndexMap::new();
                Self::fields_from_ast(&def.name, &def.fields, &mut fields)?;
                GraphQLType::Interface(InterfaceType(ObjectOrInterfaceTypeData {
                    fields,
                    interfaces: def.implements_interfaces,
                    name: def.name,
                }))
            },

            ast::schema::TypeDefinition::Union(def) =>
                GraphQLType::Union(UnionType {
                    members: def.types,
                    name: def.name,
                }),

            ast::schema::TypeDefinition::Enum(def) =>
                GraphQLType::Enum(EnumType {
                    name: def.name,
                    values: def.values.into_iter().map(|value| value.name).collect(),
                }),

            ast::schema::TypeDefinition::InputObject(def) =>
                GraphQLType::InputObject(InputObjectType {
                    fields: def.fields.iter().map(|input_val| (
                        input_val.name.to_string(),
                        InputField::from_ast(input_val),
                    )).collect(),
                    name: def.name,
                }),
        };

        let type_name = graphql_type.name().to_string();
        if self.types.contains_key(type_name.as_str()) {
            return Err(SchemaBuildError::DuplicateTypeDefinition { type_name });
        }
        self.types.insert(type_name, graphql_type);
        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
enum PendingExtension {
    Interface(ast::schema::InterfaceTypeExtension),
    Object(ast::schema::ObjectTypeExtension),
}

fn type_extension_name(ext: &ast::schema::TypeExtension) -> &str {
    match ext {
        ast::schema::TypeExtension::Enum(ext) => ext.name.as_str(),
        ast::schema::TypeExtension::InputObject(ext) => ext.name.as_str(),
        ast::schema::TypeExtension::Interface(ext) => ext.name.as_str(),
        ast::schema::TypeExtension::Object(ext) => ext.name.as_str(),
        ast::schema::TypeExtension::Scalar(ext) => ext.name.as_str(),
        ast::schema::TypeExtension::Union(ext) => ext.name.as_str(),
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("The `{field_name}` field is defined more than once on the `{type_name}` type.")]
    DuplicateFieldNameDefinition {
        field_name: String,
        type_name: String,
    },

    #[error("The `{operation}` root operation type is defined more than once.")]
    DuplicateOperationDefinition {
        operation: String,
    },

    #[error("The `{type_name}` type is defined more than once.")]
    DuplicateTypeDefinition {
        type_name: String,
    },

    #[error("Attempted to extend the `{type_name}` type, which is not defined.")]
    ExtensionOfUndefinedType {
        type_name: String,
    },

    #[error("Attempted to extend the `{type_name}` type with an extension of the wrong kind (`{type_name}` is a {type_kind} type).")]
    InvalidExtensionType {
        type_kind: GraphQLTypeKind,
        type_name: String,
    },

    #[error("The `{type_name}` type declares that it implements `{interface_name}`, but `{interface_name}` is a {type_kind} type.")]
    InvalidImplementsType {
        interface_name: String,
        type_kind: GraphQLTypeKind,
        type_name: String,
    },

    #[error("The `{operation}` root operation type must be an object type, but `{type_name}` is a {type_kind} type.")]
    InvalidOperationType {
        operation: String,
        type_kind: GraphQLTypeKind,
        type_name: String,
    },

    #[error("The `{union_name}` union includes `{member_name}`, but only object types may be union members (`{member_name}` is a {type_kind} type).")]
    InvalidUnionMemberType {
        member_name: String,
        type_kind: GraphQLTypeKind,
        union_name: String,
    },

    #[error("No query root operation type was defined.")]
    NoQueryOperationTypeDefined,

    #[error("Failed to parse `{}`: {err}", file.display())]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error(transparent)]
    SchemaFileReadError(file_reader::ReadContentError),

    #[error("The `{referencing_type}` type references `{type_name}`, which is not defined.")]
    UndefinedTypeReference {
        referencing_type: String,
        type_name: String,
    },

    #[error("Extending the `{type_name}` type is not supported; only object and interface types may be extended.")]
    UnsupportedTypeExtension {
        type_name: String,
    },
}
