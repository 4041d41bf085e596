//! Subprocess invocation of the D2 renderer

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

use super::RendererConfig;

/// Ways a single renderer invocation can fail
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("failed to prepare temporary input file: {0}")]
    TempFile(#[source] io::Error),

    #[error("failed to remove stale output '{}': {cause}", .path.display())]
    ClearOutput {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    #[error("failed to run '{program}' (is it installed and on PATH?): {cause}")]
    Spawn {
        program: String,
        #[source]
        cause: io::Error,
    },

    #[error("'{program}' {status}{}", format_stderr(.stderr))]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("'{program}' exited successfully but wrote no '{}'", .path.display())]
    NoOutput { program: String, path: PathBuf },

    #[error("failed to read rendered output '{}': {cause}", .path.display())]
    ReadOutput {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Turns a composed document into SVG text
pub trait DiagramRenderer {
    /// Render `document` to `destination` and return the SVG written there
    fn render(&self, document: &str, destination: &Path) -> Result<String, InvokeError>;
}

/// Renders by running the D2 executable as `d2 [args..] <input> <output>`
#[derive(Debug, Clone, Default)]
pub struct D2Renderer {
    config: RendererConfig,
}

impl D2Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }
}

impl DiagramRenderer for D2Renderer {
    fn render(&self, document: &str, destination: &Path) -> Result<String, InvokeError> {
        // Removed when dropped, on every return path
        let mut input = tempfile::Builder::new()
            .prefix("d2-themes-")
            .suffix(&self.config.temp_suffix)
            .tempfile()
            .map_err(InvokeError::TempFile)?;
        input
            .write_all(document.as_bytes())
            .and_then(|()| input.flush())
            .map_err(InvokeError::TempFile)?;

        match fs::remove_file(destination) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(cause) => {
                return Err(InvokeError::ClearOutput {
                    path: destination.to_path_buf(),
                    cause,
                })
            }
        }

        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(input.path())
            .arg(destination)
            .stdin(Stdio::null());
        debug!(command = ?cmd, "running renderer");

        let output = cmd.output().map_err(|cause| InvokeError::Spawn {
            program: self.config.program.clone(),
            cause,
        })?;

        if !output.status.success() {
            return Err(InvokeError::Exit {
                program: self.config.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match fs::read_to_string(destination) {
            Ok(svg) => Ok(svg),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(InvokeError::NoOutput {
                program: self.config.program.clone(),
                path: destination.to_path_buf(),
            }),
            Err(cause) => Err(InvokeError::ReadOutput {
                path: destination.to_path_buf(),
                cause,
            }),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 48"></svg>"#;

    /// A renderer that runs a shell script through `sh`, with the paths appended
    fn script_renderer(dir: &Path, script: &str) -> D2Renderer {
        let path = dir.join("stub.sh");
        fs::write(&path, script).unwrap();
        D2Renderer::new(
            RendererConfig::new()
                .with_program("sh")
                .with_args([path.to_string_lossy().into_owned()]),
        )
    }

    #[test]
    fn test_success_returns_written_svg() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = script_renderer(dir.path(), &format!("printf '%s' '{SVG}' > \"$2\"\n"));
        let out = dir.path().join("a.svg");

        let svg = renderer.render("a -> b", &out).unwrap();
        assert_eq!(svg, SVG);
        assert_eq!(fs::read_to_string(&out).unwrap(), SVG);
    }

    #[test]
    fn test_document_is_passed_via_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let seen = dir.path().join("seen.txt");
        let script = format!(
            "cp \"$1\" '{}'\necho \"$1\" >> '{}.path'\nprintf '%s' '{SVG}' > \"$2\"\n",
            seen.display(),
            seen.display()
        );
        let renderer = script_renderer(dir.path(), &script);

        renderer
            .render("x.class: queued\n", &dir.path().join("x.svg"))
            .unwrap();

        assert_eq!(fs::read_to_string(&seen).unwrap(), "x.class: queued\n");
        let temp_path = fs::read_to_string(format!("{}.path", seen.display())).unwrap();
        let temp_path = temp_path.trim();
        assert!(temp_path.ends_with(".d2"), "{temp_path}");
        assert!(!Path::new(temp_path).exists(), "temp file should be removed");
    }

    #[test]
    fn test_non_zero_exit_is_failure_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "echo \"$1\" > '{}'\necho 'syntax error' >&2\nexit 3\n",
            dir.path().join("tmp.path").display()
        );
        let renderer = script_renderer(dir.path(), &script);

        let err = renderer
            .render("broken", &dir.path().join("b.svg"))
            .unwrap_err();
        match &err {
            InvokeError::Exit { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "syntax error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("syntax error"));

        let temp_path = fs::read_to_string(dir.path().join("tmp.path")).unwrap();
        assert!(!Path::new(temp_path.trim()).exists());
    }

    #[test]
    fn test_missing_output_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = script_renderer(dir.path(), "exit 0\n");

        let err = renderer
            .render("a", &dir.path().join("none.svg"))
            .unwrap_err();
        assert!(matches!(err, InvokeError::NoOutput { .. }), "{err:?}");
    }

    #[test]
    fn test_stale_output_is_not_mistaken_for_success() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("stale.svg");
        fs::write(&out, SVG).unwrap();
        let renderer = script_renderer(dir.path(), "exit 0\n");

        let err = renderer.render("a", &out).unwrap_err();
        assert!(matches!(err, InvokeError::NoOutput { .. }), "{err:?}");
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let renderer =
            D2Renderer::new(RendererConfig::new().with_program("d2-themes-no-such-program"));

        let err = renderer
            .render("a", &dir.path().join("a.svg"))
            .unwrap_err();
        assert!(matches!(err, InvokeError::Spawn { .. }), "{err:?}");
    }
}
