use dukechat::{api::AnswerClient, app::App, config::Config, logging, ui::run_ui};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, origin) = Config::load()?;
    let _logger = logging::init(&config)?;
    info!("Loaded config from {}", origin);
    info!("Starting dukechat against {}", config.base_url);

    let client = AnswerClient::from_config(&config)?;
    let app = App::new(
        Arc::new(client),
        config.base_url.clone(),
        config.input_history_limit,
    );

    run_ui(app).await
}
