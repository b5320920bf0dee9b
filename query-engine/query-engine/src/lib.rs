#![deny(rust_2018_idioms, unsafe_code)]

pub mod cli;
pub mod context;
pub mod error;
pub mod logger;
pub mod opt;
pub mod seed;

use error::EngineError;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Copy)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests;
