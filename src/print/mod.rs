//! Print spooler access through CUPS command line tools.

mod lp;

pub use lp::LpSpooler;

use async_trait::async_trait;

use crate::app::Result;
use crate::render::RenderedDocument;

const MM_PER_INCH: f64 = 25.4;
const CSS_DPI: f64 = 96.0;

#[async_trait]
pub trait Spooler: Send + Sync {
    /// Names of the printers the spooler knows about.
    async fn list_printers(&self) -> Result<Vec<String>>;

    /// Submit a job sized to the document's physical dimensions.
    async fn submit(&self, printer: &str, document: &RenderedDocument) -> Result<()>;
}

/// CSS pixels to whole millimetres, rounded up.
pub fn px_to_mm(px: u32) -> u32 {
    (f64::from(px) * MM_PER_INCH / CSS_DPI).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_mm() {
        assert_eq!(px_to_mm(96), 26); // 25.4 rounds up
        assert_eq!(px_to_mm(0), 0);
        assert_eq!(px_to_mm(384), 102); // 101.6
        assert_eq!(px_to_mm(480), 127);
    }
}
