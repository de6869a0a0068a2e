use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use research_files::{AppState, Config, routes};

#[derive(Parser, Debug)]
#[command(name = "research-files")]
#[command(about = "Read-only file server for research documents")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "RESEARCH_FILES_PORT", default_value = "3001")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "RESEARCH_FILES_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Root directory to serve files from
    #[arg(short, long, env = "RESEARCH_FILES_ROOT", default_value = "public/files")]
    root: PathBuf,

    /// Front-end origin allowed for CORS (overrides the config file)
    #[arg(short, long, env = "RESEARCH_FILES_ORIGIN")]
    allowed_origin: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, env = "RESEARCH_FILES_VERBOSE")]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, env = "RESEARCH_FILES_CONFIG")]
    config: Option<PathBuf>,
}

/// Make the root absolute without requiring it to exist yet.
fn absolute_root(root: &Path) -> std::io::Result<PathBuf> {
    if let Ok(canonical) = root.canonicalize() {
        return Ok(canonical);
    }
    if root.is_absolute() {
        Ok(root.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(root))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "research_files=debug,tower_http=debug"
    } else {
        "research_files=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };
    if let Some(origin) = cli.allowed_origin {
        config.allowed_origin = origin;
    }

    let root_dir = absolute_root(&cli.root)?;

    info!("Research directory: {}", root_dir.display());
    if root_dir.is_dir() {
        info!("Directory exists: true");
    } else {
        warn!("Directory exists: false (files will 404 until it is created)");
    }

    let app = routes::app(AppState::with_config(root_dir, config));

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Research file server running on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET /api/files/*        - Serve files for preview");
    info!("  GET /api/download/*     - Download files");
    info!("  GET /api/health         - Health check");
    info!("  GET /api/debug/structure - View file structure");

    axum::serve(listener, app).await?;

    Ok(())
}
