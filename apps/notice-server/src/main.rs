//! Meeting notice PDF server
//!
//! HTTP front end for the notice renderer. Endpoints:
//!
//! - `POST /meeting-notice/generate-pdf`: nested meeting record to PDF
//! - `GET /`: service banner
//! - `GET|HEAD /health`: liveness probe
//!
//! Each render runs on the blocking pool under a configurable timeout.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use notice_pdf::{DisplayZone, NoticeRenderer, RendererConfig};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_generate_pdf, handle_health, handle_root};

/// Command-line arguments for the notice server
#[derive(Parser, Debug)]
#[command(name = "notice-server")]
#[command(about = "HTTP API that turns meeting records into PDF notices")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Render timeout in milliseconds
    #[arg(long, env = "NOTICE_RENDER_TIMEOUT_MS", default_value = "30000")]
    timeout_ms: u64,

    /// Directory holding meeting_notice.typ.tera and styles.typ
    #[arg(long, env = "NOTICE_TEMPLATE_DIR")]
    template_dir: Option<PathBuf>,

    /// Zone for printed dates: local, utc or +HH:MM
    #[arg(long, env = "NOTICE_TIME_ZONE", default_value = "local")]
    time_zone: DisplayZone,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<NoticeRenderer>,
    /// Render timeout in milliseconds
    pub timeout_ms: u64,
}

/// All routes with their middleware
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        // get() also answers HEAD
        .route("/health", get(handle_health))
        .route("/meeting-notice/generate-pdf", post(handle_generate_pdf))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting notice server on {}:{}", args.host, args.port);

    let config = args
        .template_dir
        .as_deref()
        .map(RendererConfig::from_template_dir)
        .unwrap_or_default()
        .with_zone(args.time_zone);
    info!(
        "Template: {}, time zone: {}",
        config.template_path.display(),
        config.zone
    );

    let state = AppState {
        renderer: Arc::new(NoticeRenderer::new(config)),
        timeout_ms: args.timeout_ms,
    };

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Render timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
