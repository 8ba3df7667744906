//! Kinjar server binary.
//!
//! - Config: `$KINJAR_CONFIG` or `kinjar.yaml` (strict YAML)
//! - Tracing via `RUST_LOG`
//! - Graceful shutdown on Ctrl-C (readiness flips to draining first)

use tracing_subscriber::{fmt, EnvFilter};

use kinjar_core::error::{KinjarError, Result};
use kinjar_server::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path).inspect_err(|e| {
        tracing::error!(%path, error = %e, "config load failed");
    })?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let seeded = state.seed_dev_sessions().await?;
    let app = router::build_router(state.clone());

    tracing::info!(
        %listen,
        base_domain = %state.resolver().base_domain(),
        roots = state.roots().len(),
        dev_sessions = seeded,
        "kinjar-server starting"
    );
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| KinjarError::Internal(format!("bind {listen} failed: {e}")))?;

    let metrics = state.metrics();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "ctrl-c handler failed");
            }
            metrics.set_draining();
            tracing::info!("shutdown requested; draining");
        })
        .await
        .map_err(|e| KinjarError::Internal(format!("server failed: {e}")))?;

    tracing::info!("kinjar-server stopped");
    Ok(())
}
