use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;

use ecommerce_connector::config::load_config;
use ecommerce_connector::ecommerce::{ODataProductDetailService, ProductDetailService};
use ecommerce_connector::odata::{HttpODataTransport, ODataClient};

#[derive(Parser)]
#[command(name = "connector-cli")]
#[command(about = "Management CLI for the e-commerce connector", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one product from the OData service
    Product {
        /// Product identifier
        id: String,
    },
    /// Validate configuration and show the effective backend endpoint
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Product { id } => {
            let transport = HttpODataTransport::new(
                &config.odata.service_uri,
                Duration::from_secs(config.odata.timeout_secs),
            )?;
            let client = Arc::new(ODataClient::new(Arc::new(transport)));
            let service = ODataProductDetailService::new(client);

            let result = service.get_detail(&id).await?;
            let product = result.product();
            let output = json!({
                "id": product.id(),
                "name": product.name(),
                "description": product.description(),
                "thumbnailUrl": product.thumbnail_url(),
                "price": product.price().map(|p| json!({
                    "price": p.price(),
                    "formattedPrice": p.formatted_price(),
                })),
                "attributes": product.attributes().iter().map(|a| json!({
                    "id": a.id(),
                    "name": a.name(),
                    "values": a.values(),
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::CheckConfig => {
            let output = json!({
                "listener": config.listener.bind_address,
                "backend": {
                    "url": config.backend.url,
                    "username": config.backend.credentials().map(|(username, _)| username),
                    "password": config.backend.password.as_ref().map(|_| "<redacted>"),
                },
                "pathPrefixes": config.proxy.path_prefixes,
                "odataServiceUri": config.odata.service_uri,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
