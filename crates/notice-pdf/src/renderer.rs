//! Notice rendering pipeline
//!
//! record → [`build_context`] → Tera → [`DocumentEngine`] → PDF bytes.
//! Resources are read on every render so template edits apply without a
//! restart.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use notice_types::MeetingNoticeRequest;

use crate::config::RendererConfig;
use crate::context::build_context;
use crate::engine::{DocumentEngine, TypstEngine};
use crate::error::RenderError;
use crate::template;

/// Renders meeting notices. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct NoticeRenderer<E: DocumentEngine = TypstEngine> {
    config: RendererConfig,
    engine: E,
}

impl NoticeRenderer<TypstEngine> {
    pub fn new(config: RendererConfig) -> Self {
        Self::with_engine(config, TypstEngine::new())
    }
}

impl Default for NoticeRenderer<TypstEngine> {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl<E: DocumentEngine> NoticeRenderer<E> {
    pub fn with_engine(config: RendererConfig, engine: E) -> Self {
        Self { config, engine }
    }

    /// Render `request` stamped with the current time
    pub fn render(&self, request: &MeetingNoticeRequest) -> Result<Vec<u8>, RenderError> {
        self.render_at(request, Utc::now())
    }

    /// Render `request` with an explicit generation instant
    pub fn render_at(
        &self,
        request: &MeetingNoticeRequest,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, RenderError> {
        tracing::info!(
            "Rendering notice for meeting {} of community {}",
            request.meeting.id,
            request.community.id
        );

        let markup = self.render_markup(request, generated_at)?;
        let stylesheet = load_resource(&self.config.stylesheet_path)?;

        let pdf = self.engine.render(&markup, &stylesheet)?;
        tracing::info!("Rendered notice {} ({} bytes)", request.meeting.id, pdf.len());
        Ok(pdf)
    }

    /// Typst markup for `request`, before compilation
    pub fn render_markup(
        &self,
        request: &MeetingNoticeRequest,
        generated_at: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        let context = build_context(request, generated_at, self.config.zone);
        let source = load_resource(&self.config.template_path)?;

        let markup = template::render_markup(&source, &context)?;
        tracing::debug!("Template produced {} bytes of markup", markup.len());
        Ok(markup)
    }
}

fn load_resource(path: &Path) -> Result<String, RenderError> {
    fs::read_to_string(path).map_err(|source| RenderError::Resource {
        path: path.to_path_buf(),
        source,
    })
}
