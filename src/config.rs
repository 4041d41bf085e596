//! Run configuration file
//!
//! An optional TOML file can set directories and the renderer command. Theme
//! definitions are fixed and cannot be configured here.
//!
//! ```toml
//! [paths]
//! input_dir = "docs/diagrams"
//! output_dir = "docs/images"
//! extension = "d2"
//!
//! [renderer]
//! program = "d2"
//! args = ["--font-regular", "Inter.ttf"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::BuildConfig;

/// Errors that can occur when loading a run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings read from a configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub renderer: RendererSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RendererSection {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override `config` with every value set in this file
    pub fn apply(self, mut config: BuildConfig) -> BuildConfig {
        if let Some(input_dir) = self.paths.input_dir {
            config.input_dir = input_dir;
        }
        if let Some(output_dir) = self.paths.output_dir {
            config.output_dir = Some(output_dir);
        }
        if let Some(extension) = self.paths.extension {
            config.extension = extension;
        }
        if let Some(program) = self.renderer.program {
            config.renderer.program = program;
        }
        if let Some(args) = self.renderer.args {
            config.renderer.args = args;
        }
        config
    }
}
