//! openedge edge runtime
//!
//! Hosts a handful of HTTP functions selected by the first label of the
//! request host.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                     OPENEDGE                      │
//!   Client Request    │  ┌────────┐   ┌──────────┐   ┌────────────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│ routing  │──▶│   functions    │  │
//!                     │  │ server │   │host slug │   │keys/hello/bye  │  │
//!                     │  └────────┘   └──────────┘   └───────┬────────┘  │
//!                     │                                      │           │
//!                     │                                      ▼           │
//!   Client Response   │                              ┌────────────────┐  │   GET /<user>.keys
//!   ◀─────────────────┼──────────────────────────────│    upstream    │──┼──────────────────▶
//!                     │                              │ key provider   │  │   Key Provider
//!                     │                              └────────────────┘  │
//!                     │  ┌────────────────────────────────────────────┐  │
//!                     │  │ config · observability · lifecycle         │  │
//!                     │  └────────────────────────────────────────────┘  │
//!                     └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use openedge::config::load_config;
use openedge::observability::{logging, metrics};
use openedge::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "openedge")]
#[command(about = "Edge runtime serving SSH key lookups and greetings", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long, env = "OPENEDGE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("openedge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        region = %config.region,
        upstream = %config.upstream.base_url,
        functions = config.functions.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // validated as a socket address
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
