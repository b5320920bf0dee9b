use crate::ScalarType;
use entity_value::EntityValue;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum InputType {
    NonNull(Box<InputType>),
    Scalar(ScalarType),
}

impl InputType {
    pub fn scalar(scalar: ScalarType) -> Self {
        InputType::Scalar(scalar)
    }

    pub fn int() -> Self {
        InputType::Scalar(ScalarType::Int)
    }

    pub fn string() -> Self {
        InputType::Scalar(ScalarType::String)
    }

    pub fn non_null(self) -> Self {
        match self {
            InputType::NonNull(_) => self,
            other => InputType::NonNull(Box::new(other)),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, InputType::NonNull(_))
    }

    /// The scalar underneath the non-null wrapper.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            InputType::NonNull(inner) => inner.scalar_type(),
            InputType::Scalar(s) => *s,
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::NonNull(inner) => write!(f, "{inner}!"),
            InputType::Scalar(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub name: String,
    pub field_type: InputType,
    pub default_value: Option<EntityValue>,
}

impl InputField {
    pub(crate) fn new(name: impl Into<String>, field_type: InputType, default_value: Option<EntityValue>) -> Self {
        Self {
            name: name.into(),
            field_type,
            default_value,
        }
    }

    /// Required means: must be provided, and must not be null.
    pub fn is_required(&self) -> bool {
        self.field_type.is_non_null() && self.default_value.is_none()
    }
}
