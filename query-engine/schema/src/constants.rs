pub const QUERY_TYPE_NAME: &str = "Query";
pub const ID_FIELD: &str = "id";

pub mod args {
    pub const ID: &str = "id";
    pub const SKIP: &str = "skip";
    pub const FIRST: &str = "first";
    pub const ORDER_BY: &str = "orderBy";
    pub const ORDER_DIRECTION: &str = "orderDirection";
    pub const TIMESTAMP: &str = "timestamp";
}

pub mod defaults {
    pub const SKIP: i64 = 0;
    pub const FIRST: i64 = 100;
    pub const ORDER_BY: &str = "id";
    pub const ORDER_DIRECTION: &str = "asc";
}

pub mod ordering {
    pub const ASC: &str = "asc";
    pub const DESC: &str = "desc";
}
