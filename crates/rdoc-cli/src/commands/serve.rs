//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rdoc_web::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
use std::path::PathBuf;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "RDOC_PORT", default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "RDOC_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Word template (.docx); the built-in template is used when omitted
    #[arg(long, env = "RDOC_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Directory for transient output files (defaults to the system temp dir)
    #[arg(long, env = "RDOC_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "RDOC_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path used with --log (defaults to rdoc-serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            template: args.template,
            output_dir: args.output_dir.unwrap_or_else(std::env::temp_dir),
            max_body_bytes: args.max_body_bytes,
        }
    }
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::from(args);

    println!();
    println!("  {} {}", "RDOC".cyan().bold(), "Report Document Server".bold());
    println!();
    println!(
        "  {}  http://{}/create-report-doc",
        "Endpoint".green(),
        config.bind_addr()
    );
    println!(
        "  {}  {}",
        "Template".green(),
        config
            .template
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    rdoc_web::run_server(config).await?;

    Ok(())
}
