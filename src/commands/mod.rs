//! CLI command implementations.

pub mod generate;

pub use generate::{execute_generate, GenerateOptions, GenerateStatus};
