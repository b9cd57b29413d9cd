use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::extract::{FromRef, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::error;

pub const INDEX_DOCUMENT: &str = "index.html";
pub const CLIENT_SCRIPT: &str = "client.js";
pub const CLIENT_WASM: &str = "client_bg.wasm";

/// State shared by every route.
#[derive(Clone)]
pub struct ServerState {
    pub signaling: SignalingService,
    pub assets_dir: Arc<PathBuf>,
}

impl ServerState {
    pub fn new(signaling: SignalingService, assets_dir: PathBuf) -> Self {
        Self {
            signaling,
            assets_dir: Arc::new(assets_dir),
        }
    }
}

impl FromRef<ServerState> for SignalingService {
    fn from_ref(state: &ServerState) -> Self {
        state.signaling.clone()
    }
}

/// `/` and deep links serve the entry document; `/ws` upgrades into the relay.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/game/room/", get(index))
        .route("/game/room/{*room_id}", get(index))
        .route("/client.js", get(client_script))
        .route("/client_bg.wasm", get(client_wasm))
        .route("/ws", get(ws_handler))
        .fallback(not_found)
        .with_state(state)
}

async fn index(State(state): State<ServerState>) -> Response {
    serve_asset(&state.assets_dir, INDEX_DOCUMENT, "text/html").await
}

async fn client_script(State(state): State<ServerState>) -> Response {
    serve_asset(&state.assets_dir, CLIENT_SCRIPT, "application/javascript").await
}

async fn client_wasm(State(state): State<ServerState>) -> Response {
    serve_asset(&state.assets_dir, CLIENT_WASM, "application/wasm").await
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

async fn serve_asset(dir: &Path, file: &str, content_type: &'static str) -> Response {
    match tokio::fs::read(dir.join(file)).await {
        Ok(body) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => {
            error!("Failed to read {}: {}", file, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error loading {file}"),
            )
                .into_response()
        }
    }
}
