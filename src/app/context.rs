use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::{PostprintError, Result};
use crate::config::Config;
use crate::domain::default_base;
use crate::fetcher::{HttpFetcher, PostFetcher};
use crate::print::{LpSpooler, Spooler};
use crate::render::{ChromeLauncher, Launcher};

/// Run options that come from the command line rather than the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub debug: bool,
    pub local: bool,
    pub output_dir: Option<PathBuf>,
}

/// Wires the external collaborators the wizard runtime drives.
pub struct AppContext {
    pub fetcher: Arc<dyn PostFetcher>,
    pub spooler: Arc<dyn Spooler>,
    pub launcher: Arc<dyn Launcher>,
    pub output_dir: PathBuf,
    pub default_base: String,
    pub debug: bool,
    pub poll_interval: Duration,
}

impl AppContext {
    pub fn new(config: &Config, options: &RunOptions) -> Result<Self> {
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => config
                .output
                .resolve_downloads_dir()
                .map_err(|e| PostprintError::Config(e.to_string()))?,
        };
        std::fs::create_dir_all(&output_dir)?;

        let fetcher: Arc<dyn PostFetcher> =
            Arc::new(HttpFetcher::new(config.watch.request_timeout())?);
        let launcher: Arc<dyn Launcher> = Arc::new(ChromeLauncher::new(
            config.renderer.clone(),
            output_dir.clone(),
        ));

        Ok(Self {
            fetcher,
            spooler: Arc::new(LpSpooler::new()),
            launcher,
            output_dir,
            default_base: default_base(options.local),
            debug: options.debug,
            poll_interval: config.watch.poll_interval(),
        })
    }

    /// Context around caller-supplied collaborators.
    pub fn with_providers(
        fetcher: Arc<dyn PostFetcher>,
        spooler: Arc<dyn Spooler>,
        launcher: Arc<dyn Launcher>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            fetcher,
            spooler,
            launcher,
            output_dir,
            default_base: default_base(false),
            debug: false,
            poll_interval: Config::default().watch.poll_interval(),
        }
    }
}
