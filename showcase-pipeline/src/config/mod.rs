//! Settings loading.
//!
//! This module handles parsing the optional `showcase.toml` file that
//! overrides the pipeline's organization, naming prefix, fetch and page
//! parameters.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{Settings, DEFAULT_ORGANIZATION, DEFAULT_PATTERN};

/// File name of the settings file looked up in the base directory.
pub const SETTINGS_FILE_NAME: &str = "showcase.toml";
