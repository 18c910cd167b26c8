//! RDOC Web Server
//!
//! Axum-based HTTP front end for report document generation.

pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    Router,
};
use rdoc_render::ReportFormatter;
use std::path::PathBuf;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Default request body cap.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Web server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `.docx` template; the built-in template is used when unset.
    pub template: Option<PathBuf>,
    /// Directory for transient output files.
    pub output_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
            template: None,
            output_dir: std::env::temp_dir(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Permissive CORS for browser callers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

/// Create the application router.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", post(routes::report_doc::create_report_doc))
        .route("/create-report-doc", post(routes::report_doc::create_report_doc))
        .route("/health", get(routes::health::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let formatter = ReportFormatter::from_paths(config.template.as_deref(), &config.output_dir)?;
    let app = create_router(AppState::new(formatter), config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Web server listening on http://{}", config.bind_addr());

    axum::serve(listener, app).await?;
    Ok(())
}
