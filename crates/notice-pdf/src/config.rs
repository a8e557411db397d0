//! Renderer settings

use std::path::{Path, PathBuf};

use crate::zone::DisplayZone;

pub const TEMPLATE_FILE: &str = "meeting_notice.typ.tera";
pub const STYLESHEET_FILE: &str = "styles.typ";

/// Where the notice resources live and which zone dates are printed in.
///
/// Immutable once built; a renderer holds one for its whole life.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub template_path: PathBuf,
    pub stylesheet_path: PathBuf,
    pub zone: DisplayZone,
}

impl RendererConfig {
    /// Bundled resources of this crate
    pub fn bundled_template_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
    }

    /// Use `meeting_notice.typ.tera` and `styles.typ` from `dir`
    pub fn from_template_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            template_path: dir.join(TEMPLATE_FILE),
            stylesheet_path: dir.join(STYLESHEET_FILE),
            zone: DisplayZone::default(),
        }
    }

    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::from_template_dir(Self::bundled_template_dir())
    }
}
