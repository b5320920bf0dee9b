use std::sync::Arc;

pub type EnumTypeRef = Arc<EnumType>;

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    name: String,
    values: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the declared value matching `input`, if any.
    pub fn value_for(&self, input: &str) -> Option<&str> {
        self.values.iter().find(|v| v.as_str() == input).map(String::as_str)
    }
}
