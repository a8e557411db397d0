//! Rendering errors

use std::path::PathBuf;

use thiserror::Error;

/// A Typst diagnostic reduced to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} (hint: {})", self.message, hint),
            None => write!(f, "{}", self.message),
        }
    }
}

fn join(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Any failure between a validated record and finished PDF bytes
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot read resource {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template rendering failed: {0}")]
    Template(String),

    #[error("Typst compilation failed: {}", join(.0))]
    Compile(Vec<Diagnostic>),

    #[error("PDF export failed: {}", join(.0))]
    Export(Vec<Diagnostic>),
}
