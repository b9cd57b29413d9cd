use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

/// Session description as the browser serializes `RTCSessionDescription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpKind,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Answer,
            sdp: sdp.into(),
        }
    }
}

/// ICE candidate in the shape of `RTCIceCandidate.toJSON()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }
}

/// Every frame exchanged over the signaling socket. `type` selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalMessage {
    CreateRoom {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    JoinRoom {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    JoinOrCreateRoom {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    RoomCreated {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    RoomJoined {
        #[serde(rename = "roomId")]
        room_id: RoomId,
    },
    PlayerJoined,
    PeerLeft,
    Error {
        message: String,
    },
    Offer {
        offer: SessionDescription,
    },
    Answer {
        answer: SessionDescription,
    },
    Candidate {
        candidate: IceCandidate,
    },
}

impl SignalMessage {
    /// Wire names of the requests the relay acts on itself.
    pub const ROOM_REQUEST_TYPES: [&'static str; 3] =
        ["create_room", "join_room", "join_or_create_room"];

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Wire name of the variant, as carried in `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateRoom { .. } => "create_room",
            Self::JoinRoom { .. } => "join_room",
            Self::JoinOrCreateRoom { .. } => "join_or_create_room",
            Self::RoomCreated { .. } => "room_created",
            Self::RoomJoined { .. } => "room_joined",
            Self::PlayerJoined => "player_joined",
            Self::PeerLeft => "peer_left",
            Self::Error { .. } => "error",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::Candidate { .. } => "candidate",
        }
    }

    pub fn is_room_request(&self) -> bool {
        matches!(
            self,
            Self::CreateRoom { .. } | Self::JoinRoom { .. } | Self::JoinOrCreateRoom { .. }
        )
    }

    /// Offer, answer and candidate frames: relayed untouched between peers.
    pub fn is_negotiation(&self) -> bool {
        matches!(
            self,
            Self::Offer { .. } | Self::Answer { .. } | Self::Candidate { .. }
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
