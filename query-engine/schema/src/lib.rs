#![deny(rust_2018_idioms, unsafe_code)]

pub mod constants;

mod build;
mod entity;
mod enum_type;
mod error;
mod input_types;
mod output_types;
mod registry;
mod renderer;
mod utils;

pub use build::build;
pub use entity::*;
pub use enum_type::*;
pub use error::*;
pub use input_types::*;
pub use output_types::*;
pub use registry::*;
pub use renderer::render_graphql_schema;
pub use utils::*;

use std::sync::Arc;

pub type TypeRegistryRef = Arc<TypeRegistry>;
