use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use postprint::app::AppContext;
use postprint::cli::Cli;
use postprint::config::Config;
use postprint::wizard::Msg;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns stdout, so logs go to a file.
    let log_path = init_tracing(cli.debug)?;

    let config = Config::load()?;
    let ctx = Arc::new(AppContext::new(&config, &cli.run_options())?);
    tracing::info!(
        "postprint starting, base {}, output {}",
        ctx.default_base,
        ctx.output_dir.display()
    );

    let (tx, rx) = postprint::tui::channel();
    let cancel = CancellationToken::new();

    // Raw mode turns Ctrl+C into a key event; this covers signals from elsewhere.
    let interrupt_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = interrupt_tx.send(Msg::Interrupted);
        }
    });

    let outcome = postprint::tui::run(ctx, &config, tx, rx, cancel.clone()).await;
    cancel.cancel();
    let outcome = outcome?;

    match outcome.error {
        Some(error) => {
            eprintln!("{}: {}", outcome.status, error);
            eprintln!("See {} for details.", log_path.display());
            std::process::exit(1);
        }
        None if !outcome.status.is_empty() => println!("{}", outcome.status),
        None => {}
    }

    Ok(())
}

fn init_tracing(debug: bool) -> anyhow::Result<PathBuf> {
    let log_dir = dirs::data_dir()
        .context("Could not find data directory")?
        .join("postprint");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("postprint.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    let default_level = if debug { "postprint=debug" } else { "postprint=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .init();

    Ok(log_path)
}
