use crate::model::{IceCandidate, SessionDescription, SignalMessage};
use crate::negotiation::error::TransportError;
use async_trait::async_trait;

/// The platform peer connection a session drives.
///
/// Browsers implement it over `RTCPeerConnection`, tests over in-memory mocks.
#[async_trait(?Send)]
pub trait PeerTransport {
    async fn create_offer(&self) -> Result<SessionDescription, TransportError>;

    async fn create_answer(&self) -> Result<SessionDescription, TransportError>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), TransportError>;

    async fn set_remote_description(&self, desc: SessionDescription)
    -> Result<(), TransportError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), TransportError>;

    async fn close(&self) -> Result<(), TransportError>;
}

/// Outbound half of the signaling socket.
pub trait SignalSink {
    fn send_signal(&self, msg: SignalMessage) -> Result<(), TransportError>;
}
