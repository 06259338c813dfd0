#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub(crate) members: Vec<String>,
    pub(crate) name: String,
}
impl UnionType {
    pub fn has_member(&self, type_name: &str) -> bool {
        self.members.iter().any(|member| member == type_name)
    }

    /// Names of the object types that make up this union, in declaration
    /// order.
    pub fn members(&self) -> &[String] {
        self.members.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
