use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use voxbrief_core::VoxbriefConfig;
use voxbrief_inference::{build_router, ServiceContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxbrief_inference=info,tower_http=debug".into()),
        )
        .init();

    // load config: VOXBRIEF_CONFIG env > ~/.voxbrief/voxbrief.toml
    let config_path = std::env::var("VOXBRIEF_CONFIG").ok();
    let config = VoxbriefConfig::load_or_env(config_path.as_deref(), |e| {
        warn!("Config load failed ({}), using defaults plus env", e)
    });
    let inference = config.inference;

    let ctx = Arc::new(ServiceContext::from_config(&inference));
    match ctx.models() {
        Some((t, s)) => info!(transcriber = t.name(), summarizer = s.name(), "models ready"),
        None => warn!(
            whisper_loaded = ctx.transcriber.is_some(),
            summarizer_loaded = ctx.summarizer.is_some(),
            "models not configured, /process will answer 503"
        ),
    }

    let router = build_router(ctx, inference.max_upload_bytes);

    let addr: SocketAddr = format!("{}:{}", inference.bind, inference.port).parse()?;
    info!("voxbrief inference listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
