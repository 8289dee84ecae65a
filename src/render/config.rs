use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the headless Chromium renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Chrome/Chromium binary to use; when unset a build is downloaded on first run
    pub chrome_executable: Option<PathBuf>,

    /// Ceiling for downloading Chromium in seconds (default: 180)
    pub install_timeout_secs: u64,

    /// Ceiling for launching the browser in seconds (default: 60)
    pub launch_timeout_secs: u64,

    /// CSS selector of the element that becomes the PDF page (default: ".PostCard")
    pub selector: String,

    /// How long to wait for the selector to appear in milliseconds (default: 10000)
    pub selector_timeout_ms: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            install_timeout_secs: 180,
            launch_timeout_secs: 60,
            selector: ".PostCard".to_string(),
            selector_timeout_ms: 10_000,
        }
    }
}

impl RendererConfig {
    pub fn install_timeout(&self) -> Duration {
        Duration::from_secs(self.install_timeout_secs)
    }

    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.launch_timeout_secs)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    /// Where downloaded Chromium builds live: `~/.cache/postprint/chromium`
    pub fn browser_cache_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("postprint").join("chromium"))
    }
}
