use tether_core::ConnectionId;

/// Inputs to the relay actor, sent by the WebSocket layer.
#[derive(Debug)]
pub enum RelayCommand {
    /// A text frame arrived on `conn`.
    Inbound { conn: ConnectionId, text: String },

    /// The socket behind `conn` closed.
    Disconnect { conn: ConnectionId },

    /// Stop the actor and drop every room.
    Shutdown,
}
