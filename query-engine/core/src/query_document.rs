//! The query document executed against the root type.
//!
//! ```json
//! {
//!   "selections": [
//!     {
//!       "name": "account",
//!       "arguments": { "id": "0xa" },
//!       "selections": [{ "name": "tokens", "arguments": { "first": 2 }, "selections": [{ "name": "id" }] }]
//!     }
//!   ]
//! }
//! ```

use crate::{CoreError, CoreResult};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryDocument {
    pub selections: Vec<Selection>,
}

impl QueryDocument {
    pub fn new(selections: Vec<Selection>) -> Self {
        Self { selections }
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|err| CoreError::QueryDocumentError(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Selection {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub arguments: IndexMap<String, JsonValue>,
    #[serde(default)]
    pub selections: Vec<Selection>,
}

impl Selection {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: IndexMap::new(),
            selections: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn argument(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn nested(mut self, selection: Selection) -> Self {
        self.selections.push(selection);
        self
    }

    /// Key of this selection in the response: the alias if set, the field name otherwise.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
