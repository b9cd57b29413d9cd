pub mod game;
pub mod model;
pub mod negotiation;
pub mod utils;

pub use model::{ConnectionId, IceCandidate, Role, RoomId, SdpKind, SessionDescription, SignalMessage};
pub use negotiation::{
    ChannelState, NegotiationError, NegotiationRole, NegotiationSession, PeerTransport,
    SessionEvent, SignalSink, SignalingState, TransportError,
};
