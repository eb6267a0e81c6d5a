//! Chain relay server.
//!
//! ```text
//!     Client ──HTTP──▶ http (axum + tower-http) ──▶ relay ──▶ ContractGateway ──JSON-RPC──▶ chain
//!                                                     │
//!                                                     └── config / observability / lifecycle
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use chain_relay::config::load_config;
use chain_relay::lifecycle::{build_relay, wait_for_termination, Shutdown};
use chain_relay::observability::{logging, metrics};
use chain_relay::{net, HttpServer};

#[derive(Parser)]
#[command(name = "chain-relay", version, about = "Transaction relay for NFT claims and a random picker")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "RELAY_CONFIG", default_value = "relay.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), config = %args.config.display(), "chain-relay starting");

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let relay = Arc::new(build_relay(&config).await?);
    tracing::info!(
        mints = relay.mint_names().count(),
        picker = relay.has_picker(),
        "Relay ready"
    );

    let shutdown = Shutdown::new();
    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let addr: SocketAddr = config.listener.bind_address.parse()?;
    let server = HttpServer::new(&config, relay);
    let signal = shutdown.subscribe();

    let mut server = match config.listener.tls.clone() {
        Some(tls) => {
            let router = server.into_router();
            tokio::spawn(async move { net::serve_tls(router, addr, &tls, signal, grace).await })
        }
        None => {
            let listener = TcpListener::bind(addr).await?;
            tokio::spawn(async move { server.run(listener, signal).await })
        }
    };

    tokio::select! {
        joined = &mut server => {
            joined??;
            tracing::warn!("Server exited without a shutdown signal");
            return Ok(());
        }
        _ = wait_for_termination() => {}
    }
    shutdown.trigger();

    match tokio::time::timeout(grace, server).await {
        Ok(joined) => joined??,
        Err(_) => tracing::warn!(grace_secs = grace.as_secs(), "In-flight requests did not drain in time"),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
