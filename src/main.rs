use anyhow::Result;
use tempview::{TempViewConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TempViewConfig::load()?;
    logging::init(&config.logging)?;

    tracing::info!("TempView {} starting", tempview::VERSION);
    web::run(&config).await
}
