/// A custom (non-builtin) scalar. Values of custom scalars are passed
/// through argument coercion structurally.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub(crate) name: String,
}
impl ScalarType {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
