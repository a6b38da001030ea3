use anyhow::Result;
use clap::Parser;
use gemini_image_proxy::gemini::GeminiClient;
use gemini_image_proxy::models::Config;
use gemini_image_proxy::server::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-image-proxy")]
#[command(about = "OpenAI-compatible image generation proxy for Gemini")]
struct CliArgs {
    /// Port to listen on; overrides the PORT environment variable.
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_image_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    info!(
        "Upstream model: {} at {}",
        config.gemini_model, config.gemini_base_url
    );
    if config.proxy_api_key.is_none() {
        info!("PROXY_API_KEY not set; requests are not authenticated");
    }

    let config = Arc::new(config);
    let backend = Arc::new(GeminiClient::new(&config));
    let app = build_router(AppState::new(config.clone(), backend));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
