use crate::ast;
use crate::types::TypeAnnotation;
use crate::Value;

/// A declared argument of a [`Field`](crate::types::Field).
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub(crate) default_value: Option<Value>,
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Parameter {
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub(crate) fn from_ast(input_val: &ast::schema::InputValue) -> Self {
        Self {
            default_value: input_val.default_value.as_ref().map(Value::from_ast),
            name: input_val.name.to_string(),
            type_annotation: TypeAnnotation::from_ast_type(&input_val.value_type),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
