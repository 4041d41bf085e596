//! Diagram sources and theme composition

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

/// A user-authored, theme-agnostic diagram file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSource {
    /// Where the diagram was read from
    pub path: PathBuf,
    /// Logical name, the file stem (`pipeline` for `pipeline.d2`)
    pub name: String,
    /// The diagram body
    pub text: String,
}

impl DiagramSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            text: text.into(),
        }
    }

    /// Read a diagram from disk
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path, text))
    }

    /// Output file for this diagram rendered in `theme`
    ///
    /// `<name>.svg` for light, `<name>.dark.svg` for dark.
    pub fn output_path(&self, output_dir: &Path, theme: Theme) -> PathBuf {
        output_dir.join(format!("{}{}.svg", self.name, theme.file_suffix()))
    }

    /// Compose this diagram with a theme prologue
    pub fn compose(&self, theme: Theme) -> String {
        compose(theme, &self.text)
    }
}

/// Prepend the theme prologue to a diagram body
pub fn compose(theme: Theme, diagram: &str) -> String {
    let prologue = theme.prologue();
    let mut document = String::with_capacity(prologue.len() + 1 + diagram.len());
    document.push_str(prologue);
    document.push('\n');
    document.push_str(diagram);
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_is_prologue_newline_body() {
        let body = "a -> b: {class: subtask-edge}\n";
        for theme in Theme::ALL {
            assert_eq!(
                compose(theme, body),
                format!("{}\n{}", theme.prologue(), body)
            );
        }
    }

    #[test]
    fn test_body_does_not_touch_prologue() {
        let first = compose(Theme::Dark, "x.class: queued");
        let second = compose(Theme::Dark, "y.class: failed\nx -> y");
        let prefix = format!("{}\n", Theme::Dark.prologue());
        assert!(first.starts_with(&prefix));
        assert!(second.starts_with(&prefix));
        assert_eq!(&second[prefix.len()..], "y.class: failed\nx -> y");
    }

    #[test]
    fn test_body_kept_verbatim_even_if_it_mentions_colors() {
        let body = "title: {style.fill: \"#fcf9fa\"; style.font-color: \"black\"}";
        let doc = compose(Theme::Dark, body);
        assert!(doc.ends_with(body));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(
            compose(Theme::Light, ""),
            format!("{}\n", Theme::Light.prologue())
        );
    }

    #[test]
    fn test_name_is_stem() {
        let source = DiagramSource::new("diagrams/pipeline.d2", "a");
        assert_eq!(source.name, "pipeline");
    }

    #[test]
    fn test_output_paths() {
        let source = DiagramSource::new("diagrams/pipeline.d2", "a");
        let out = Path::new("out");
        assert_eq!(
            source.output_path(out, Theme::Light),
            PathBuf::from("out/pipeline.svg")
        );
        assert_eq!(
            source.output_path(out, Theme::Dark),
            PathBuf::from("out/pipeline.dark.svg")
        );
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.d2");
        fs::write(&path, "a -> b\n").unwrap();

        let source = DiagramSource::load(&path).unwrap();
        assert_eq!(source.name, "graph");
        assert_eq!(source.text, "a -> b\n");
        assert_eq!(source.path, path);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DiagramSource::load(&dir.path().join("nope.d2")).is_err());
    }
}
