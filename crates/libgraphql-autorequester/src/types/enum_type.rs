#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub(crate) name: String,
    pub(crate) values: Vec<String>,
}
impl EnumType {
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn values(&self) -> &[String] {
        self.values.as_slice()
    }
}
