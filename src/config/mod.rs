// src/config/mod.rs

//! Configuration loading and validation for changed-paths.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and merge CLI inputs (`loader.rs`).
//! - Compile patterns and parse `NAME=TEMPLATE` outputs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, split_lines};
pub use model::{Config, OutputSpec, RawConfig};
pub use validate::{parse_output, parse_outputs};
