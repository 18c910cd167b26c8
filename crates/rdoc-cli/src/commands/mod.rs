//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod export_template;
pub mod render;
pub mod serve;

/// Report document service - renders analytics reports into Word documents
#[derive(Parser)]
#[command(name = "rdoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the report document web server
    Serve(serve::ServeArgs),

    /// Render a report JSON file into a .docx
    Render(render::RenderArgs),

    /// Write the built-in template to a .docx for editing
    ExportTemplate(export_template::ExportTemplateArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Render(args) => render::execute(args),
            Commands::ExportTemplate(args) => export_template::execute(args),
        }
    }
}
