//! Export the built-in template.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ExportTemplateArgs {
    /// Destination .docx path
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: ExportTemplateArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let bytes = rdoc_render::builtin::builtin_archive()?;
    std::fs::write(&args.output, bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("{} {}", "Exported template to".green().bold(), args.output.display());
    println!(
        "  {}",
        "Edit it in Word, then pass it with --template.".dimmed()
    );
    Ok(())
}
