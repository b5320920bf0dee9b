use entity_value::EntityValue;
use indexmap::IndexMap;
use schema::constants::{defaults, ordering};
use serde::Serialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => ordering::ASC,
            SortOrder::Desc => ordering::DESC,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ordering::ASC => Ok(SortOrder::Asc),
            ordering::DESC => Ok(SortOrder::Desc),
            other => Err(format!(
                "Invalid order direction `{other}`, expected `{}` or `{}`.",
                ordering::ASC,
                ordering::DESC
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection, pagination, ordering and point-in-time parameters of a `find_many` call.
///
/// `timestamp: None` reads the latest state and is not serialized at all, which keeps it
/// distinguishable from an explicit `0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(rename = "where")]
    pub where_: IndexMap<String, EntityValue>,
    pub skip: i64,
    pub first: i64,
    pub order_by: String,
    pub order_direction: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            where_: IndexMap::new(),
            skip: defaults::SKIP,
            first: defaults::FIRST,
            order_by: defaults::ORDER_BY.to_owned(),
            order_direction: SortOrder::default(),
            timestamp: None,
        }
    }
}

impl Filter {
    /// Adds an equality condition on `field`.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<EntityValue>) -> Self {
        self.where_.insert(field.into(), value.into());
        self
    }

    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = skip;
        self
    }

    pub fn first(mut self, first: i64) -> Self {
        self.first = first;
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortOrder) -> Self {
        self.order_by = field.into();
        self.order_direction = direction;
        self
    }

    pub fn at(mut self, timestamp: Option<i64>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
