use async_trait::async_trait;
use tokio::process::Command;

use crate::app::{PostprintError, Result};
use crate::print::{px_to_mm, Spooler};
use crate::render::RenderedDocument;

/// Talks to CUPS through `lpstat` and `lp`.
#[derive(Debug, Clone, Default)]
pub struct LpSpooler;

impl LpSpooler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Spooler for LpSpooler {
    async fn list_printers(&self) -> Result<Vec<String>> {
        let output = Command::new("lpstat").arg("-p").output().await?;
        if !output.status.success() {
            return Err(PostprintError::Print(format!(
                "lpstat failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let printers = parse_lpstat(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!("found printers: {:?}", printers);
        Ok(printers)
    }

    async fn submit(&self, printer: &str, document: &RenderedDocument) -> Result<()> {
        let args = lp_args(printer, document);
        tracing::debug!("lp {:?}", args);

        let output = Command::new("lp").args(&args).output().await?;
        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(PostprintError::Print(format!(
                "lp error: {}: {}",
                output.status,
                combined.trim()
            )));
        }
        Ok(())
    }
}

/// Extract printer names from `lpstat -p` lines of the form `printer <name> ...`.
fn parse_lpstat(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("printer"), Some(name)) => Some(name.to_string()),
                _ => None,
            }
        })
        .collect()
}

fn lp_args(printer: &str, document: &RenderedDocument) -> Vec<String> {
    vec![
        "-d".to_string(),
        printer.to_string(),
        "-o".to_string(),
        format!(
            "media=Custom.{}x{}mm",
            px_to_mm(document.width),
            px_to_mm(document.height)
        ),
        "-o".to_string(),
        "fit-to-page".to_string(),
        document.path.display().to_string(),
    ]
}
