//! Controller configuration.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::ConflictResolution;

/// Configuration for a file operation session.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ControllerConfig {
    /// Directory browsed when the session starts.
    pub start_dir: PathBuf,

    /// Include hidden (dot-prefixed) entries in listings.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub show_hidden: bool,

    /// How paste and move treat an existing entry of the same name.
    #[builder(default)]
    #[serde(default)]
    pub conflict_resolution: ConflictResolution,
}

fn default_true() -> bool {
    true
}

impl ControllerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.start_dir {
            Some(ref dir) if dir.as_os_str().is_empty() => {
                Err("Start directory cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Start directory is required".to_string()),
        }
    }
}

impl ControllerConfig {
    /// Create a new config builder.
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    /// Create a config with defaults for a start directory.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            show_hidden: true,
            conflict_resolution: ConflictResolution::default(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
