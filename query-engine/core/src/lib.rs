#![deny(rust_2018_idioms, unsafe_code)]

pub mod error;
pub mod executor;
pub mod query_document;
pub mod response_ir;

mod arguments;
mod context;
mod resolver;

pub use error::*;
pub use executor::*;
pub use query_document::*;
pub use response_ir::*;

pub type CoreResult<T> = Result<T, CoreError>;
