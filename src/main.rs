use std::sync::Arc;

use analyze_relay::{build_app, logging, run_server, AppConfig, AppState, OpenAiClient};
use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::configure_logging();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let addr = config.listen_addr()?;

    let client = OpenAiClient::from_config(&config);
    info!(model = client.model(), base_url = %config.base_url, "completion client ready");

    let app = build_app(AppState::new(Arc::new(client)), config.body_limit_bytes);

    run_server(app, addr).await.context("server failed")?;
    Ok(())
}
