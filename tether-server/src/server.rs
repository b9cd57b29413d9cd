use crate::config::ServerConfig;
use crate::http::{ServerState, router};
use crate::relay::{RelayCommand, SignalingRelay};
use crate::room::RoomRegistry;
use crate::signaling::SignalingService;
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};

const RELAY_QUEUE_DEPTH: usize = 256;

/// Bind `config.bind_addr` and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    serve_with_listener(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves, then tear the registry down.
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (relay_tx, relay_rx) = mpsc::channel::<RelayCommand>(RELAY_QUEUE_DEPTH);
    let signaling = SignalingService::new(relay_tx.clone());

    let relay = SignalingRelay::new(
        RoomRegistry::new(config.max_rooms),
        relay_rx,
        Arc::new(signaling.clone()),
        config.relay_options(),
    );
    let relay_task = tokio::spawn(relay.run());

    let app = router(ServerState::new(signaling, config.assets_dir.clone()));

    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Signaling server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    let _ = relay_tx.send(RelayCommand::Shutdown).await;
    relay_task.await.context("Relay task failed")?;

    info!("Signaling server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
