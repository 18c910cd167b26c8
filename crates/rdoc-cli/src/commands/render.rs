//! Offline render command.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;
use rdoc_core::ReportRequest;
use rdoc_render::{to_data_uri, ReportFormatter};
use std::path::PathBuf;
use tracing::debug;

#[derive(Args)]
pub struct RenderArgs {
    /// Request JSON file ({"report": ..., "insights": ...})
    pub input: PathBuf,

    /// Output .docx path (defaults to the input name with a .docx extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Word template (.docx); the built-in template is used when omitted
    #[arg(long, env = "RDOC_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Print the document as a data URI instead of writing a file
    #[arg(long)]
    pub data_uri: bool,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let body = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let request = ReportRequest::from_slice(&body)?;

    let formatter = ReportFormatter::from_paths(args.template.as_deref(), &std::env::temp_dir())?;
    let docx = formatter.render(&request, Local::now().date_naive())?;
    debug!(size = docx.len(), "Rendered report");

    if args.data_uri {
        println!("{}", to_data_uri(&docx));
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("docx"));
    std::fs::write(&output, &docx)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{} {}", "Wrote".green().bold(), output.display());
    Ok(())
}
