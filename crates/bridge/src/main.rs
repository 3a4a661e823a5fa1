use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_browser_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file early for environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,movie_browser_bridge=debug,movie_browser_core=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config =
        Config::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    movie_browser_bridge::start_bridge(config).await
}
