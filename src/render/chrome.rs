use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::Page;
use futures::StreamExt;

use crate::app::{PostprintError, Result};
use crate::render::config::RendererConfig;
use crate::render::{pdf_path, print_url, Launcher, RenderedDocument, Renderer};

const CSS_DPI: f64 = 96.0;
const SELECTOR_POLL: Duration = Duration::from_millis(100);

/// Chromium-backed renderer using chromiumoxide
pub struct ChromeRenderer {
    browser: Browser,
    config: RendererConfig,
    output_dir: PathBuf,
}

impl ChromeRenderer {
    /// Locate a browser binary, downloading Chromium into the cache when none
    /// is configured.
    pub async fn install(config: &RendererConfig) -> Result<PathBuf> {
        if let Some(ref path) = config.chrome_executable {
            return Ok(path.clone());
        }

        let cache_dir = RendererConfig::browser_cache_dir()
            .ok_or_else(|| PostprintError::Launch("Could not find cache directory".into()))?;
        tokio::fs::create_dir_all(&cache_dir).await?;

        let options = BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .map_err(|e| PostprintError::Launch(format!("Invalid fetcher options: {}", e)))?;

        let installation = BrowserFetcher::new(options)
            .fetch()
            .await
            .map_err(|e| PostprintError::Launch(format!("Failed to download Chromium: {}", e)))?;

        Ok(installation.executable_path)
    }

    /// Launch the browser and keep its event handler running.
    pub async fn launch(
        config: RendererConfig,
        executable: &Path,
        output_dir: PathBuf,
    ) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .chrome_executable(executable)
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| PostprintError::Launch(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| PostprintError::Launch(format!("Failed to launch browser: {}", e)))?;

        tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        Ok(Self {
            browser,
            config,
            output_dir,
        })
    }

    async fn render_page(&self, page: &Page, path: PathBuf) -> Result<RenderedDocument> {
        page.wait_for_navigation()
            .await
            .map_err(|e| PostprintError::Render(format!("Navigation failed: {}", e)))?;

        self.wait_for_selector(page).await?;

        // Best effort: layout can shift once web fonts arrive.
        let _ = page
            .evaluate("document.fonts && document.fonts.ready ? document.fonts.ready.then(() => true) : true")
            .await;

        page.execute(SetEmulatedMediaParams::builder().media("screen").build())
            .await
            .map_err(|e| PostprintError::Render(format!("Failed to emulate media: {}", e)))?;

        let (width, height) = self.measure(page).await?;

        let params = PrintToPdfParams::builder()
            .print_background(true)
            .paper_width(f64::from(width) / CSS_DPI)
            .paper_height(f64::from(height) / CSS_DPI)
            .margin_top(0.0)
            .margin_bottom(0.0)
            .margin_left(0.0)
            .margin_right(0.0)
            .build();

        let pdf = page
            .pdf(params)
            .await
            .map_err(|e| PostprintError::Render(format!("Failed to print PDF: {}", e)))?;

        tokio::fs::write(&path, pdf).await?;

        Ok(RenderedDocument {
            path,
            width,
            height,
        })
    }

    async fn wait_for_selector(&self, page: &Page) -> Result<()> {
        let started = Instant::now();
        loop {
            match page.find_element(self.config.selector.as_str()).await {
                Ok(_) => return Ok(()),
                Err(e) if started.elapsed() >= self.config.selector_timeout() => {
                    return Err(PostprintError::Render(format!(
                        "{} did not appear: {}",
                        self.config.selector, e
                    )));
                }
                Err(_) => tokio::time::sleep(SELECTOR_POLL).await,
            }
        }
    }

    async fn measure(&self, page: &Page) -> Result<(u32, u32)> {
        let result: serde_json::Value = page
            .evaluate(measure_script(&self.config.selector))
            .await
            .map_err(|e| PostprintError::Render(format!("Measurement failed: {}", e)))?
            .into_value()
            .map_err(|e| PostprintError::Render(format!("Failed to parse measurement: {:?}", e)))?;

        let width = result["width"].as_f64().unwrap_or(0.0);
        let height = result["height"].as_f64().unwrap_or(0.0);
        if width <= 0.0 || height <= 0.0 {
            return Err(PostprintError::Render(format!(
                "unexpected measurement result: {}",
                result
            )));
        }
        Ok((width.ceil() as u32, height.ceil() as u32))
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn render(&self, base: &str, post_id: &str) -> Result<RenderedDocument> {
        let path = pdf_path(&self.output_dir, post_id)?;
        let url = print_url(base, post_id);
        tracing::debug!("opening {}", url);

        let page = self
            .browser
            .new_page(url.as_str())
            .await
            .map_err(|e| PostprintError::Render(format!("Failed to create page: {}", e)))?;

        let result = self.render_page(&page, path).await;
        let _ = page.close().await;
        result
    }
}

/// Installs and launches [`ChromeRenderer`]s writing into `output_dir`.
pub struct ChromeLauncher {
    config: RendererConfig,
    output_dir: PathBuf,
}

impl ChromeLauncher {
    pub fn new(config: RendererConfig, output_dir: PathBuf) -> Self {
        Self { config, output_dir }
    }
}

#[async_trait]
impl Launcher for ChromeLauncher {
    async fn install(&self) -> Result<PathBuf> {
        ChromeRenderer::install(&self.config).await
    }

    async fn launch(&self, executable: &Path) -> Result<Arc<dyn Renderer>> {
        let renderer: Arc<dyn Renderer> = Arc::new(
            ChromeRenderer::launch(self.config.clone(), executable, self.output_dir.clone())
                .await?,
        );
        Ok(renderer)
    }

    fn install_timeout(&self) -> Duration {
        self.config.install_timeout()
    }

    fn launch_timeout(&self) -> Duration {
        self.config.launch_timeout()
    }
}

/// Script returning the selector's bounding box, rounded up to whole pixels.
fn measure_script(selector: &str) -> String {
    let quoted = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
        (() => {{
            const el = document.querySelector({quoted});
            if (!el) {{
                return {{ width: 0, height: 0 }};
            }}
            const rect = el.getBoundingClientRect();
            return {{ width: Math.ceil(rect.width), height: Math.ceil(rect.height) }};
        }})()
        "#
    )
}
