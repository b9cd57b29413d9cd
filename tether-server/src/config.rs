use crate::relay::RelayOptions;
use crate::room::DEFAULT_MAX_ROOMS;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Runtime settings of the signaling server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Concurrent room limit enforced on create.
    pub max_rooms: usize,
    /// Directory holding `index.html` and the wasm-bindgen client output.
    pub assets_dir: PathBuf,
    /// Send `peer_left` to the remaining member when a room is torn down.
    pub notify_peer_left: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_rooms: DEFAULT_MAX_ROOMS,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            notify_peer_left: false,
        }
    }
}

impl ServerConfig {
    pub fn relay_options(&self) -> RelayOptions {
        RelayOptions {
            notify_peer_left: self.notify_peer_left,
        }
    }
}
