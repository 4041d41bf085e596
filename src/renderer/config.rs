//! Configuration for invoking the external renderer

/// How the D2 executable is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Program to run (looked up on PATH)
    pub program: String,

    /// Extra arguments placed before the input and output paths
    pub args: Vec<String>,

    /// Suffix for the temporary input file (D2 picks the parser from it)
    pub temp_suffix: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "d2".to_string(),
            args: Vec::new(),
            temp_suffix: ".d2".to_string(),
        }
    }
}

impl RendererConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the renderer program
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the extra arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the temporary file suffix
    pub fn with_temp_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.temp_suffix = suffix.into();
        self
    }
}
