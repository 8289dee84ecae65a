//! Post rendering: turns a post's print page into a PDF sized to the post card.
//!
//! ```text
//! {base}/posts/{id}/print → headless Chromium → <output_dir>/<id>.pdf
//! ```

mod chrome;
mod config;

pub use chrome::{ChromeLauncher, ChromeRenderer};
pub use config::RendererConfig;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{PostprintError, Result};

/// A rendered PDF and the pixel size of the element it was cut to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Renders one post into a PDF.
///
/// Implementations wrap a single shared browser; callers serialize access.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, base: &str, post_id: &str) -> Result<RenderedDocument>;
}

/// Provides the browser behind a [`Renderer`] in two steps so callers can
/// bound and report each one separately.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Locate or download a browser executable.
    async fn install(&self) -> Result<PathBuf>;

    async fn launch(&self, executable: &Path) -> Result<Arc<dyn Renderer>>;

    fn install_timeout(&self) -> Duration;

    fn launch_timeout(&self) -> Duration;
}

pub fn print_url(base: &str, post_id: &str) -> String {
    format!("{}/posts/{}/print", base.trim_end_matches('/'), post_id)
}


/// `<output_dir>/<post_id>.pdf`, refusing ids that would escape `output_dir`.
pub fn pdf_path(output_dir: &Path, post_id: &str) -> Result<PathBuf> {
    if post_id.is_empty()
        || post_id == "."
        || post_id == ".."
        || post_id.contains(['/', '\\'])
    {
        return Err(PostprintError::Render(format!(
            "unusable post id for a file name: {:?}",
            post_id
        )));
    }
    Ok(output_dir.join(format!("{}.pdf", post_id)))
}
