use crate::model::Role;
use std::fmt;

/// Which side creates the offer. Assigned once, when the room becomes ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationRole {
    Initiator,
    Responder,
}

impl From<Role> for NegotiationRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Host => Self::Initiator,
            Role::Guest => Self::Responder,
        }
    }
}

/// Signaling progress of a session.
///
/// Initiator: `Idle -> HasLocalOffer -> Connected`.
/// Responder: `Idle -> HasRemoteOffer -> HasLocalAnswer -> Connected`.
/// `Closed` is terminal and reachable from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    Idle,
    HasLocalOffer,
    HasRemoteOffer,
    HasLocalAnswer,
    Connected,
    Closed,
}

impl SignalingState {
    fn rank(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::HasLocalOffer | Self::HasRemoteOffer => 1,
            Self::HasLocalAnswer => 2,
            Self::Connected => 3,
            Self::Closed => 4,
        }
    }

    /// Forward-only ordering; sessions never move back to an earlier state.
    pub fn can_advance_to(self, next: SignalingState) -> bool {
        next == Self::Closed || next.rank() > self.rank()
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }
}

impl fmt::Display for SignalingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::HasLocalOffer => "has-local-offer",
            Self::HasRemoteOffer => "has-remote-offer",
            Self::HasLocalAnswer => "has-local-answer",
            Self::Connected => "connected",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Application data path state, tracked apart from signaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Pending,
    Open,
    Closed,
}
