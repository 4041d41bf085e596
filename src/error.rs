//! Error types for rendering and batch runs

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::renderer::{InvokeError, SvgError};
use crate::theme::Theme;

/// Failure of one (diagram, theme) pair
///
/// None of these stop a batch run; they are collected in the report.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The renderer exited non-zero, could not be run, or wrote nothing
    #[error("renderer failed on {} ({theme}): {cause}", .diagram.display())]
    Renderer {
        diagram: PathBuf,
        theme: Theme,
        #[source]
        cause: InvokeError,
    },

    /// The renderer succeeded but its SVG has no usable viewBox
    #[error("malformed renderer output for {} ({theme}): {cause}", .diagram.display())]
    MalformedOutput {
        diagram: PathBuf,
        theme: Theme,
        #[source]
        cause: SvgError,
    },

    /// Reading the diagram or writing the fixed SVG failed
    #[error("I/O error on {} ({theme}): {cause}", .diagram.display())]
    Io {
        diagram: PathBuf,
        theme: Theme,
        #[source]
        cause: io::Error,
    },
}

impl RenderError {
    /// The diagram source this failure belongs to
    pub fn diagram(&self) -> &Path {
        match self {
            RenderError::Renderer { diagram, .. }
            | RenderError::MalformedOutput { diagram, .. }
            | RenderError::Io { diagram, .. } => diagram,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            RenderError::Renderer { theme, .. }
            | RenderError::MalformedOutput { theme, .. }
            | RenderError::Io { theme, .. } => *theme,
        }
    }
}

/// Environment problems that abort a whole batch run
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("cannot read input directory '{}': {cause}", .path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("cannot create output directory '{}': {cause}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },
}
