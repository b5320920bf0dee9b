#![deny(rust_2018_idioms, unsafe_code)]

mod database;
mod error;
mod query_builder;
mod table;
mod value;

pub use database::SqliteStore;
pub use value::{decode_big_int, encode_big_int};

/// Upper bound of the validity range of the latest version of a record.
pub const LATEST: i64 = i64::MAX;
