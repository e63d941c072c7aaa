use ai_llm_service::telemetry;
use api::core::app_config::AppConfig;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine: every setting has a default.
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let level = if config.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", level))
        .with(telemetry::layer())
        .init();

    api::start(config).await?;

    Ok(())
}
