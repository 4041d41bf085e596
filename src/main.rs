//! D2 Themes CLI
//!
//! Usage:
//!   d2-themes [OPTIONS]
//!
//! Options:
//!   -i, --input-dir <DIR>    Directory containing diagram sources [default: diagrams]
//!   -o, --output-dir <DIR>   Directory for SVG output [default: <input-dir>/svg]
//!   -e, --extension <EXT>    Diagram file extension [default: d2]
//!   -r, --renderer <PROGRAM> Renderer executable [default: d2]
//!   -c, --config <FILE>      Run configuration (TOML format)
//!   -t, --theme <THEME>      Only render one theme (light, dark)
//!   -v, --verbose            Log renderer commands
//!   -h, --help               Print help

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use d2_themes::{build, BuildConfig, FileConfig, Theme};

#[derive(Parser)]
#[command(name = "d2-themes", version)]
#[command(about = "Render D2 diagrams to light and dark SVGs for documentation")]
struct Cli {
    /// Directory containing diagram sources
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory for SVG output (defaults to <input-dir>/svg)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Diagram file extension
    #[arg(short, long)]
    extension: Option<String>,

    /// Renderer executable
    #[arg(short, long)]
    renderer: Option<String>,

    /// Run configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only render one theme
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Log renderer commands
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line flags take precedence over the file configuration
    fn apply(self, mut config: BuildConfig) -> BuildConfig {
        if let Some(dir) = self.input_dir {
            config = config.with_input_dir(dir);
        }
        if let Some(dir) = self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(extension) = self.extension {
            config = config.with_extension(extension);
        }
        if let Some(program) = self.renderer {
            config.renderer = config.renderer.with_program(program);
        }
        if let Some(theme) = self.theme {
            config = config.with_only_theme(theme);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut config = BuildConfig::default();
    if let Some(path) = &cli.config {
        match FileConfig::from_file(path) {
            Ok(file) => config = file.apply(config),
            Err(e) => {
                error!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }
    let config = cli.apply(config);

    match build(&config) {
        Ok(report) if report.is_success() => {
            info!("{report}");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            error!("{report}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "d2-themes",
            "--input-dir",
            "docs/diagrams",
            "--renderer",
            "d2-nightly",
            "--theme",
            "dark",
        ]);
        let config = cli.apply(BuildConfig::new().with_output_dir("out"));

        assert_eq!(config.input_dir, PathBuf::from("docs/diagrams"));
        assert_eq!(config.output_dir(), PathBuf::from("out"));
        assert_eq!(config.renderer.program, "d2-nightly");
        assert_eq!(config.themes, vec![Theme::Dark]);
    }

    #[test]
    fn test_cli_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["d2-themes"]);
        let config = cli.apply(BuildConfig::default());
        assert_eq!(config.output_dir(), PathBuf::from("diagrams/svg"));
        assert_eq!(config.themes, Theme::ALL.to_vec());
    }
}
