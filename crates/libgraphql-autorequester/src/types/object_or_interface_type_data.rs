use crate::types::Field;
use inherent::inherent;
use indexmap::IndexMap;

/// Accessors shared by [`ObjectType`](crate::types::ObjectType) and
/// [`InterfaceType`](crate::types::InterfaceType).
pub trait ObjectOrInterfaceTypeTrait {
    fn field(&self, field_name: &str) -> Option<&Field>;
    fn fields(&self) -> &IndexMap<String, Field>;
    fn interfaces(&self) -> &[String];
    fn implements_interface(&self, interface_name: &str) -> bool;
    fn name(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ObjectOrInterfaceTypeData {
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}

#[inherent]
impl ObjectOrInterfaceTypeTrait for ObjectOrInterfaceTypeData {
    pub fn field(&self, field_name: &str) -> Option<&Field> {
        self.fields.get(field_name)
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    /// Names of the interfaces this type declares it implements. A built
    /// schema lists transitively implemented interfaces here too, as GraphQL
    /// requires them to be declared explicitly.
    pub fn interfaces(&self) -> &[String] {
        self.interfaces.as_slice()
    }

    pub fn implements_interface(&self, interface_name: &str) -> bool {
        self.interfaces.iter().any(|iface| iface == interface_name)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
