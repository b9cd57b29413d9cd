use crate::model::{IceCandidate, SessionDescription, SignalMessage};
use crate::negotiation::error::NegotiationError;
use crate::negotiation::state::{ChannelState, NegotiationRole, SignalingState};
use crate::negotiation::transport::{PeerTransport, SignalSink};
use tracing::{debug, info, warn};

/// Discrete inputs that drive a [`NegotiationSession`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The room became ready (host saw `player_joined`, guest saw `room_joined`).
    Start,
    /// A frame relayed from the other peer.
    Signal(SignalMessage),
    /// The local transport discovered a candidate (trickle ICE).
    LocalCandidate(IceCandidate),
    /// The data channel opened, whether created locally or announced by the peer.
    ChannelOpen,
    ChannelClosed,
    TransportFailed(String),
    Close,
}

/// One offer/answer/ICE negotiation between the two members of a room.
pub struct NegotiationSession<T, S> {
    role: NegotiationRole,
    state: SignalingState,
    channel: ChannelState,
    /// `Start` was accepted once already.
    started: bool,
    transport: T,
    sink: S,
}

impl<T, S> NegotiationSession<T, S>
where
    T: PeerTransport,
    S: SignalSink,
{
    pub fn new(role: NegotiationRole, transport: T, sink: S) -> Self {
        Self {
            role,
            state: SignalingState::Idle,
            channel: ChannelState::Pending,
            started: false,
            transport,
            sink,
        }
    }

    pub fn role(&self) -> NegotiationRole {
        self.role
    }

    pub fn state(&self) -> SignalingState {
        self.state
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply one input. A rejected input leaves the state untouched.
    pub async fn handle(&mut self, event: SessionEvent) -> Result<(), NegotiationError> {
        if self.is_closed() {
            return match event {
                SessionEvent::Close | SessionEvent::ChannelClosed => Ok(()),
                _ => Err(NegotiationError::Closed),
            };
        }

        match event {
            SessionEvent::Start => self.start().await,
            SessionEvent::Signal(msg) => self.on_signal(msg).await,
            SessionEvent::LocalCandidate(candidate) => {
                self.sink.send_signal(SignalMessage::Candidate { candidate })?;
                Ok(())
            }
            SessionEvent::ChannelOpen => {
                if self.channel != ChannelState::Open {
                    info!("Data channel open ({:?})", self.role);
                    self.channel = ChannelState::Open;
                }
                Ok(())
            }
            SessionEvent::ChannelClosed => {
                info!("Data channel closed");
                self.shutdown().await
            }
            SessionEvent::TransportFailed(reason) => {
                warn!("Peer transport failed: {}", reason);
                self.shutdown().await
            }
            SessionEvent::Close => self.shutdown().await,
        }
    }

    async fn start(&mut self) -> Result<(), NegotiationError> {
        if self.started || self.state != SignalingState::Idle {
            return Err(NegotiationError::AlreadyStarted(self.state));
        }
        self.started = true;

        if self.role == NegotiationRole::Responder {
            debug!("Responder waiting for offer");
            return Ok(());
        }

        let offer = self.transport.create_offer().await?;
        self.transport.set_local_description(offer.clone()).await?;
        self.advance(SignalingState::HasLocalOffer);

        self.sink.send_signal(SignalMessage::Offer { offer })?;
        Ok(())
    }

    async fn on_signal(&mut self, msg: SignalMessage) -> Result<(), NegotiationError> {
        match msg {
            SignalMessage::Offer { offer } => self.on_offer(offer).await,
            SignalMessage::Answer { answer } => self.on_answer(answer).await,
            SignalMessage::Candidate { candidate } => self
                .transport
                .add_ice_candidate(candidate)
                .await
                .map_err(NegotiationError::Candidate),
            other => Err(NegotiationError::NotNegotiation(other.kind())),
        }
    }

    async fn on_offer(&mut self, offer: SessionDescription) -> Result<(), NegotiationError> {
        if self.role != NegotiationRole::Responder || self.state != SignalingState::Idle {
            return Err(NegotiationError::UnexpectedOffer(self.state));
        }

        self.transport.set_remote_description(offer).await?;
        self.advance(SignalingState::HasRemoteOffer);

        let answer = self.transport.create_answer().await?;
        self.transport.set_local_description(answer.clone()).await?;
        self.advance(SignalingState::HasLocalAnswer);
        self.advance(SignalingState::Connected);

        self.sink.send_signal(SignalMessage::Answer { answer })?;
        Ok(())
    }

    async fn on_answer(&mut self, answer: SessionDescription) -> Result<(), NegotiationError> {
        if self.state != SignalingState::HasLocalOffer {
            return Err(NegotiationError::UnexpectedAnswer(self.state));
        }

        self.transport.set_remote_description(answer).await?;
        self.advance(SignalingState::Connected);
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), NegotiationError> {
        self.advance(SignalingState::Closed);
        self.channel = ChannelState::Closed;
        self.transport.close().await?;
        Ok(())
    }

    fn advance(&mut self, next: SignalingState) {
        debug_assert!(self.state.can_advance_to(next), "{} -> {}", self.state, next);
        debug!("Signaling state {} -> {}", self.state, next);
        self.state = next;
    }
}
