//! Rendering every diagram in a directory
//!
//! Each diagram is rendered once per theme. A failing (diagram, theme) pair is
//! recorded and the run moves on; only a missing input directory or an
//! unusable output directory stops the batch.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::compose::DiagramSource;
use crate::error::{BatchError, RenderError};
use crate::renderer::DiagramRenderer;
use crate::{render_diagram, BuildConfig};

/// All failures recorded for one diagram source
#[derive(Debug)]
pub struct SourceFailure {
    pub diagram: PathBuf,
    /// One entry per failed theme, in render order
    pub errors: Vec<RenderError>,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in render order
    pub written: Vec<PathBuf>,
    /// Diagrams with at least one failed theme, in discovery order
    pub failures: Vec<SourceFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failed (diagram, theme) pairs
    pub fn failed_pairs(&self) -> usize {
        self.failures.iter().map(|f| f.errors.len()).sum()
    }

    fn record(&mut self, error: RenderError) {
        if let Some(last) = self.failures.last_mut() {
            if last.diagram == error.diagram() {
                last.errors.push(error);
                return;
            }
        }
        self.failures.push(SourceFailure {
            diagram: error.diagram().to_path_buf(),
            errors: vec![error],
        });
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file(s) written", self.written.len())?;
        if self.failures.is_empty() {
            return Ok(());
        }
        write!(f, ", {} diagram(s) failed:", self.failures.len())?;
        for failure in &self.failures {
            for error in &failure.errors {
                write!(f, "\n  {}", error)?;
            }
        }
        Ok(())
    }
}

/// List diagram files in `dir` with the given extension, sorted by path
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BatchError> {
    let extension = extension.trim_start_matches('.');
    let input_err = |cause| BatchError::InputDir {
        path: dir.to_path_buf(),
        cause,
    };

    let mut diagrams = Vec::new();
    for entry in fs::read_dir(dir).map_err(input_err)? {
        let path = entry.map_err(input_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            diagrams.push(path);
        }
    }
    diagrams.sort();
    Ok(diagrams)
}

/// Render every diagram in the configured input directory
pub fn run<R>(config: &BuildConfig, renderer: &R) -> Result<BatchReport, BatchError>
where
    R: DiagramRenderer + ?Sized,
{
    let diagrams = discover(&config.input_dir, &config.extension)?;
    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).map_err(|cause| BatchError::OutputDir {
        path: output_dir.clone(),
        cause,
    })?;

    info!(
        count = diagrams.len(),
        input = %config.input_dir.display(),
        output = %output_dir.display(),
        "rendering diagrams"
    );

    let mut report = BatchReport::default();
    for path in &diagrams {
        let source = match DiagramSource::load(path) {
            Ok(source) => source,
            Err(cause) => {
                for &theme in &config.themes {
                    let error = RenderError::Io {
                        diagram: path.clone(),
                        theme,
                        cause: std::io::Error::new(cause.kind(), cause.to_string()),
                    };
                    warn!("{error}");
                    report.record(error);
                }
                continue;
            }
        };

        for &theme in &config.themes {
            match render_diagram(&source, theme, &output_dir, renderer) {
                Ok(written) => report.written.push(written),
                Err(error) => {
                    warn!("{error}");
                    report.record(error);
                }
            }
        }
    }

    Ok(report)
}
