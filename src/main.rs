//! E-commerce connector proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 CONNECTOR                    │
//!   GET /heatmap/**     │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   GET /preview/**  ───┼─▶│  http  │──▶│  proxy   │──▶│  pooled    │──┼──▶ Admin
//!                       │  │ server │   │ rewrite/ │   │  client +  │  │    Server
//!   body | status    ◀──┼──│        │◀──│ headers  │◀──│ basic auth │◀─┼───
//!                       │  └────────┘   └──────────┘   └────────────┘  │
//!                       │                                              │
//!                       │  config · observability · lifecycle          │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use ecommerce_connector::config::load_config;
use ecommerce_connector::lifecycle;
use ecommerce_connector::observability::logging;

#[derive(Parser)]
#[command(name = "ecommerce-connector")]
#[command(about = "Forwarding proxy for the merchandising admin server", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init(&config.observability);

    tracing::info!("ecommerce-connector v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.url,
        credentials = config.backend.credentials().is_some(),
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
