use crate::ast;
use crate::types::Parameter;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

/// An output field declared on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) parameters: IndexMap<String, Parameter>,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Field {
    pub(crate) fn from_ast(field: &ast::schema::Field) -> Self {
        Self {
            name: field.name.to_string(),
            parameters: field.arguments.iter().map(|input_val| (
                input_val.name.to_string(),
                Parameter::from_ast(input_val),
            )).collect(),
            type_annotation: TypeAnnotation::from_ast_type(&field.field_type),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Declared arguments, in declaration order.
    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.parameters
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
