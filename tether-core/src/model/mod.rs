mod connection;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use room::{Role, RoomId};
pub use signaling::{IceCandidate, SdpKind, SessionDescription, SignalMessage};
