use crate::{EnumTypeRef, InputField, ScalarType};
use once_cell::sync::Lazy;
use std::{
    fmt,
    sync::{Arc, Weak},
};

pub type ObjectTypeStrongRef = Arc<ObjectType>;
pub type ObjectTypeWeakRef = Weak<ObjectType>;

/// Upgrades a weak handle handed out by the registry. The registry outlives every
/// handle it gives out, so a dangling handle is a bug.
pub trait IntoArc<T> {
    fn into_arc(&self) -> Arc<T>;
}

impl<T> IntoArc<T> for Weak<T> {
    fn into_arc(&self) -> Arc<T> {
        self.upgrade().expect("Expected weak reference to be valid.")
    }
}

#[derive(Debug, Clone)]
pub enum OutputType {
    NonNull(Box<OutputType>),
    List(Box<OutputType>),
    Scalar(ScalarType),
    Enum(EnumTypeRef),
    Object(ObjectTypeWeakRef),
}

impl OutputType {
    pub fn scalar(scalar: ScalarType) -> Self {
        OutputType::Scalar(scalar)
    }

    pub fn enum_type(containing: EnumTypeRef) -> Self {
        OutputType::Enum(containing)
    }

    pub fn object(containing: ObjectTypeWeakRef) -> Self {
        OutputType::Object(containing)
    }

    pub fn list(containing: OutputType) -> Self {
        OutputType::List(Box::new(containing))
    }

    pub fn non_null(self) -> Self {
        match self {
            OutputType::NonNull(_) => self,
            other => OutputType::NonNull(Box::new(other)),
        }
    }

    pub fn non_null_if(self, condition: bool) -> Self {
        if condition { self.non_null() } else { self }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, OutputType::NonNull(_))
    }

    /// Attempts to recurse through the type until an object type is found.
    pub fn as_object_type(&self) -> Option<ObjectTypeStrongRef> {
        match self {
            OutputType::NonNull(inner) | OutputType::List(inner) => inner.as_object_type(),
            OutputType::Object(obj) => Some(obj.into_arc()),
            _ => None,
        }
    }

    /// Name of the innermost named type.
    pub fn named_type(&self) -> String {
        match self {
            OutputType::NonNull(inner) | OutputType::List(inner) => inner.named_type(),
            OutputType::Scalar(s) => s.name().to_owned(),
            OutputType::Enum(e) => e.name().to_owned(),
            OutputType::Object(obj) => obj.into_arc().name().to_owned(),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::NonNull(inner) => write!(f, "{inner}!"),
            OutputType::List(inner) => write!(f, "[{inner}]"),
            _ => f.write_str(&self.named_type()),
        }
    }
}

/// How the value of a field is produced from its parent record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldResolver {
    Scalar(ScalarType),
    Enum,
    Relationship {
        related_entity: String,
    },
    Derived {
        entity: String,
        field: String,
    },
    List,
    /// Root query: single record by id.
    FindUnique {
        entity: String,
    },
    /// Root query: paginated records.
    FindMany {
        entity: String,
    },
}

type OutputObjectFields = Lazy<Vec<OutputField>, Box<dyn FnOnce() -> Vec<OutputField> + Send + Sync>>;

pub struct ObjectType {
    name: String,
    fields: OutputObjectFields,
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .finish()
    }
}

impl ObjectType {
    pub(crate) fn new(
        name: impl Into<String>,
        fields: impl FnOnce() -> Vec<OutputField> + Send + Sync + 'static,
    ) -> Self {
        let lazy = Lazy::new(Box::new(fields) as Box<dyn FnOnce() -> Vec<OutputField> + Send + Sync>);

        ObjectType {
            name: name.into(),
            fields: lazy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forces the field thunk on first call. Concurrent first callers block until it has run once.
    pub fn get_fields(&self) -> &[OutputField] {
        Lazy::force(&self.fields).as_slice()
    }

    pub fn find_field(&self, name: &str) -> Option<&OutputField> {
        self.get_fields().iter().find(|f| f.name == name)
    }

    pub fn fields_initialized(&self) -> bool {
        Lazy::get(&self.fields).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct OutputField {
    pub name: String,
    pub field_type: OutputType,
    pub arguments: Vec<InputField>,
    pub resolver: FieldResolver,
}

impl OutputField {
    pub(crate) fn new(name: impl Into<String>, field_type: OutputType, resolver: FieldResolver) -> Self {
        Self {
            name: name.into(),
            field_type,
            arguments: Vec::new(),
            resolver,
        }
    }

    pub(crate) fn arguments(mut self, arguments: Vec<InputField>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn find_argument(&self, name: &str) -> Option<&InputField> {
        self.arguments.iter().find(|a| a.name == name)
    }

    pub fn is_nullable(&self) -> bool {
        !self.field_type.is_non_null()
    }
}
