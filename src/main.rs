use anyhow::Result;
use clap::Parser;
use imagen_flow::app::App;
use imagen_flow::config::Config;
use imagen_flow::server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "imagen-flow")]
#[command(about = "AI image generation sidecar for content editors")]
struct CliArgs {
    /// Address to bind, overriding BIND_ADDRESS.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagen_flow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting imagen-flow");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if config.gemini_api_key.is_none() {
        // Startup proceeds; API calls fail until the key is configured.
        error!("GEMINI_API_KEY is not set; generation requests will fail");
    }

    let bind_address = args.bind.unwrap_or_else(|| config.bind_address.clone());

    match App::from_config(&config) {
        Ok(app) => {
            if let Err(e) = server::serve(Arc::new(app), &bind_address).await {
                error!("Server error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
