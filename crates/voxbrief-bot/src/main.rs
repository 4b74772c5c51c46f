use std::sync::Arc;

use tracing::{error, info, warn};
use voxbrief_core::VoxbriefConfig;
use voxbrief_relay::MediaRelay;
use voxbrief_telegram::TelegramAdapter;

// Handlers only wait on I/O, so one thread serves every chat.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "voxbrief_bot=info,voxbrief_relay=info,voxbrief_telegram=info".into()
            }),
        )
        .init();

    // load config: VOXBRIEF_CONFIG env > ~/.voxbrief/voxbrief.toml, then BOT_TOKEN / ML_SERVER_URL
    let config_path = std::env::var("VOXBRIEF_CONFIG").ok();
    let config = VoxbriefConfig::load_or_env(config_path.as_deref(), |e| {
        warn!("Config load failed ({}), using environment only", e)
    });

    let relay = Arc::new(MediaRelay::from_config(&config.bot, &config.templates));

    let adapter = match TelegramAdapter::new(&config.bot, Arc::clone(&relay)) {
        Ok(adapter) => adapter,
        Err(e) => {
            error!(error = %e, "BOT_TOKEN is not set; make sure the BOT_TOKEN environment variable is defined");
            return Ok(());
        }
    };

    match relay.client() {
        Some(client) => {
            info!(url = client.base_url(), "media relay enabled");
            match client.health().await {
                Ok(report) => info!(
                    status = %report.status,
                    models_loaded = report.models_loaded,
                    "inference endpoint reachable"
                ),
                Err(e) => warn!(error = %e, "inference endpoint health check failed"),
            }
        }
        None => warn!("ML_SERVER_URL is not set; voice and video processing is disabled"),
    }

    let scratch_dir = config.bot.scratch_dir();
    tokio::fs::create_dir_all(&scratch_dir).await?;

    info!(scratch_dir = %scratch_dir.display(), "bot starting");
    adapter.run().await;
    Ok(())
}
