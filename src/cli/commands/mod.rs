//! CLI command implementations.

mod generate;

pub use generate::{default_output_file, run_generate, GenerateOptions};
