//! TripAdvisor Proxy
//!
//! Forwards `search`, `photos`, `details` and `reviews` calls to the
//! TripAdvisor Content API with a server-held key.
//!
//! ```text
//!     Browser ──GET /search?searchQuery=Paris──▶ proxy ──GET .../location/search?key=…&language=en
//!                                                  │         &searchQuery=Paris&category=hotels──▶ TripAdvisor
//!     Browser ◀──────── relayed JSON body ─────────┘◀──────────────────────────────────────────────
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tripadvisor_proxy::config::load_config;
use tripadvisor_proxy::observability::{logging, metrics};
use tripadvisor_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "tripadvisor-proxy")]
#[command(about = "Reverse proxy for the TripAdvisor Content API", long_about = None)]
struct Cli {
    /// Optional TOML config file; PORT and TRIPADVISOR_TOKEN override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overriding file and environment.
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("tripadvisor-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        credential_mode = ?config.upstream.credential_mode,
        timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "TripAdvisor Proxy is online");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_signal());

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
