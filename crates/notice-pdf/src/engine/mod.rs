//! Markup to PDF
//!
//! [`DocumentEngine`] is the seam between the notice pipeline and the
//! typesetter. [`TypstEngine`] is the production implementation; tests swap
//! in fakes to observe the markup without compiling it.

pub mod fonts;
pub mod virtual_fs;
pub mod world;

use typst::diag::{Severity, SourceDiagnostic};
use typst_pdf::PdfOptions;

use crate::error::{Diagnostic, RenderError};
use world::NoticeWorld;

/// Turns rendered markup plus its stylesheet into PDF bytes
pub trait DocumentEngine: Send + Sync {
    fn render(&self, markup: &str, stylesheet: &str) -> Result<Vec<u8>, RenderError>;
}

/// Typst compiler with embedded fonts and an in-memory filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct TypstEngine;

impl TypstEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentEngine for TypstEngine {
    fn render(&self, markup: &str, stylesheet: &str) -> Result<Vec<u8>, RenderError> {
        let world = NoticeWorld::new(markup.to_string(), stylesheet.to_string());

        let warned = typst::compile(&world);
        for warning in &warned.warnings {
            tracing::warn!("Typst warning: {}", to_diagnostic(warning));
        }

        let document = warned
            .output
            .map_err(|diagnostics| RenderError::Compile(collect_errors(&diagnostics)))?;
        tracing::debug!("Compiled notice with {} pages", document.pages.len());

        typst_pdf::pdf(&document, &PdfOptions::default())
            .map_err(|diagnostics| RenderError::Export(collect_errors(&diagnostics)))
    }
}

/// Errors of a failed compile or export; warnings among them are logged
fn collect_errors(diagnostics: &[SourceDiagnostic]) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    for diag in diagnostics {
        match diag.severity {
            Severity::Error => errors.push(to_diagnostic(diag)),
            Severity::Warning => tracing::warn!("Typst warning: {}", to_diagnostic(diag)),
        }
    }

    if errors.is_empty() {
        errors.push(Diagnostic::new("compilation failed without an error diagnostic"));
    }

    errors
}

fn to_diagnostic(diag: &SourceDiagnostic) -> Diagnostic {
    let diagnostic = Diagnostic::new(diag.message.to_string());
    if diag.hints.is_empty() {
        return diagnostic;
    }

    let hint = diag
        .hints
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    diagnostic.with_hint(hint)
}
