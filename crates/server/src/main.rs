//! VisKom API server

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use viskom_server::{start_server, AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "viskom-server")]
#[command(about = "HTTP API for the VisKom ID3 and Naive Bayes demos")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file (also read from VISKOM_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Log format: pretty or compact
    #[arg(long)]
    log_format: Option<String>,

    /// Built frontend directory served for non-API paths
    #[arg(long)]
    frontend_dist: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(self) -> Result<ServerConfig> {
        let path = self
            .config
            .or_else(|| std::env::var_os("VISKOM_CONFIG").map(PathBuf::from));
        let mut config = ServerConfig::load(path.as_deref())?;

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(dist) = self.frontend_dist {
            config.frontend_dist = Some(dist);
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(config: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "compact" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().resolve_config()?;
    init_logging(&config);

    info!("VisKom API v{}", env!("CARGO_PKG_VERSION"));

    start_server(AppState::new(config)).await
}
