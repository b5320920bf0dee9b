#![deny(rust_2018_idioms, unsafe_code)]

pub mod error;

mod filter;
mod interface;
mod store_error;

pub use filter::*;
pub use interface::*;
pub use store_error::*;

pub type Result<T> = std::result::Result<T, error::ConnectorError>;
