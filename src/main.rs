// src/main.rs
use agri_portal::{run_with_config, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_with_messages(false).await?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .format_timestamp_secs()
    .init();

    config.log_summary();
    if let Some(path) = config.config_path() {
        log::debug!("Config file: {}", path);
    }

    run_with_config(config).await
}
