use crate::types::Field;
use crate::types::ObjectOrInterfaceTypeData;
use crate::types::ObjectOrInterfaceTypeTrait;
use inherent::inherent;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType(pub(crate) ObjectOrInterfaceTypeData);

#[inherent]
impl ObjectOrInterfaceTypeTrait for InterfaceType {
    pub fn field(&self, field_name: &str) -> Option<&Field> {
        self.0.field(field_name)
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        self.0.fields()
    }

    pub fn interfaces(&self) -> &[String] {
        self.0.interfaces()
    }

    pub fn implements_interface(&self, interface_name: &str) -> bool {
        self.0.implements_interface(interface_name)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }
}
