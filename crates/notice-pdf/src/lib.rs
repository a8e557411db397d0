//! Meeting notice PDF generation
//!
//! Turns a validated [`notice_types::MeetingNoticeRequest`] into PDF bytes:
//! - Field formatting (dates, call times, file sizes, labels)
//! - Template context assembly
//! - Tera rendering of the Typst notice template
//! - Typst compilation and PDF export behind [`DocumentEngine`]

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod format;
pub mod renderer;
pub mod template;
pub mod zone;

pub use config::RendererConfig;
pub use context::{build_context, NoticeContext};
pub use engine::{DocumentEngine, TypstEngine};
pub use error::RenderError;
pub use renderer::NoticeRenderer;
pub use zone::DisplayZone;
