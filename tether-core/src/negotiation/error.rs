use crate::negotiation::state::SignalingState;
use thiserror::Error;

/// Failure reported by the platform peer connection or the signaling socket.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Reasons an input was rejected. None of them end the session on their own.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("offer received in state {0}")]
    UnexpectedOffer(SignalingState),

    #[error("answer received in state {0}")]
    UnexpectedAnswer(SignalingState),

    #[error("session already started (state {0})")]
    AlreadyStarted(SignalingState),

    #[error("session is closed")]
    Closed,

    #[error("{0} is not a negotiation message")]
    NotNegotiation(&'static str),

    #[error("failed to add remote candidate: {0}")]
    Candidate(#[source] TransportError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
