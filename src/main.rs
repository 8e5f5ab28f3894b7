use markethunt_bot::{
    config::{self, Config},
    discord::run_discord_bot,
    market::MarketClient,
};
use miette::Result;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Load environment variables
    config::load_dotenv();

    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    info!("Loaded configuration");

    let market = MarketClient::new(&config.market)?;

    // Run Discord bot
    run_discord_bot(config.discord, Arc::new(market)).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "markethunt_bot=debug,serenity=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();
}
