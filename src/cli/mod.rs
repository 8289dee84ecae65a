use std::path::PathBuf;

use clap::Parser;

use crate::app::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "postprint")]
#[command(about = "Render smallerworld posts to PDF and send them to a printer", long_about = None)]
pub struct Cli {
    /// Show internal steps in the log pane and log at debug level
    #[arg(long)]
    pub debug: bool,

    /// Use the local development server (http://localhost:3000)
    #[arg(long)]
    pub local: bool,

    /// Directory for rendered PDFs (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            debug: self.debug,
            local: self.local,
            output_dir: self.output_dir.clone(),
        }
    }
}
