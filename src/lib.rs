//! D2 Themes - light and dark SVGs from D2 diagrams
//!
//! Each diagram body is prefixed with a fixed theme prologue, rendered with the
//! `d2` executable, and the resulting SVG is given explicit `width`/`height`
//! so it keeps its size when embedded in static documentation.
//!
//! # Example
//!
//! ```rust
//! use d2_themes::{compose, fix_dimensions, Theme};
//!
//! let document = compose(Theme::Dark, "a -> b: {class: subtask-edge}");
//! assert!(document.starts_with(Theme::Dark.prologue()));
//!
//! let svg = fix_dimensions(r#"<svg viewBox="0 0 640 480"></svg>"#).unwrap();
//! assert!(svg.contains(r#"width="640" height="480""#));
//! ```

pub mod batch;
pub mod compose;
pub mod config;
pub mod error;
pub mod renderer;
pub mod theme;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use batch::{BatchReport, SourceFailure};
pub use compose::{compose, DiagramSource};
pub use config::{ConfigError, FileConfig};
pub use error::{BatchError, RenderError};
pub use renderer::{fix_dimensions, D2Renderer, DiagramRenderer, RendererConfig, SvgError};
pub use theme::Theme;

/// Configuration for a complete batch run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the diagram sources
    pub input_dir: PathBuf,
    /// Where SVGs are written; `<input_dir>/svg` when unset
    pub output_dir: Option<PathBuf>,
    /// Diagram file extension, without the dot
    pub extension: String,
    /// Renderer invocation settings
    pub renderer: RendererConfig,
    /// Themes to render, in order
    pub themes: Vec<Theme>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("diagrams"),
            output_dir: None,
            extension: "d2".to_string(),
            renderer: RendererConfig::default(),
            themes: Theme::ALL.to_vec(),
        }
    }
}

impl BuildConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input directory
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the diagram file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the renderer configuration
    pub fn with_renderer(mut self, renderer: RendererConfig) -> Self {
        self.renderer = renderer;
        self
    }

    /// Restrict the run to a single theme
    pub fn with_only_theme(mut self, theme: Theme) -> Self {
        self.themes = vec![theme];
        self
    }

    /// The effective output directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_dir.join("svg"))
    }
}

/// Render one diagram in one theme and write the fixed SVG
///
/// Returns the path of the written file.
pub fn render_diagram<R>(
    source: &DiagramSource,
    theme: Theme,
    output_dir: &Path,
    renderer: &R,
) -> Result<PathBuf, RenderError>
where
    R: DiagramRenderer + ?Sized,
{
    let destination = source.output_path(output_dir, theme);
    info!(diagram = %source.name, %theme, "generating {}", destination.display());

    let document = source.compose(theme);
    let svg = renderer
        .render(&document, &destination)
        .map_err(|cause| RenderError::Renderer {
            diagram: source.path.clone(),
            theme,
            cause,
        })?;

    let fixed = match fix_dimensions(&svg) {
        Ok(fixed) => fixed,
        Err(cause) => {
            discard_output(&destination);
            return Err(RenderError::MalformedOutput {
                diagram: source.path.clone(),
                theme,
                cause,
            });
        }
    };

    if fixed != svg {
        if let Err(cause) = fs::write(&destination, fixed) {
            discard_output(&destination);
            return Err(RenderError::Io {
                diagram: source.path.clone(),
                theme,
                cause,
            });
        }
    }

    Ok(destination)
}

/// Remove a rendered file that could not be given explicit dimensions
fn discard_output(destination: &Path) {
    match fs::remove_file(destination) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("failed to remove unfixed output {}: {e}", destination.display()),
    }
}

/// Render every diagram in `config.input_dir` with the D2 executable
pub fn build(config: &BuildConfig) -> Result<BatchReport, BatchError> {
    let renderer = D2Renderer::new(config.renderer.clone());
    batch::run(config, &renderer)
}
