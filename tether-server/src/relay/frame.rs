use serde_json::Value;
use tether_core::{RoomId, SignalMessage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing string `type` field")]
    MissingType,

    #[error("malformed {kind} request: {source}")]
    BadRequest {
        kind: String,
        source: serde_json::Error,
    },
}

/// Room admission requests the relay answers itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomRequest {
    Create(RoomId),
    Join(RoomId),
    JoinOrCreate(RoomId),
}

impl RoomRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            RoomRequest::Create(_) => "create_room",
            RoomRequest::Join(_) => "join_room",
            RoomRequest::JoinOrCreate(_) => "join_or_create_room",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum InboundFrame {
    Room(RoomRequest),
    /// Anything else with a `type`. Forwarded verbatim, never re-encoded.
    Opaque { kind: String },
}

pub fn classify(text: &str) -> Result<InboundFrame, FrameError> {
    let value: Value = serde_json::from_str(text)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(FrameError::MissingType)?
        .to_owned();

    if !SignalMessage::ROOM_REQUEST_TYPES.contains(&kind.as_str()) {
        return Ok(InboundFrame::Opaque { kind });
    }

    let request = match serde_json::from_value::<SignalMessage>(value) {
        Ok(SignalMessage::CreateRoom { room_id }) => RoomRequest::Create(room_id),
        Ok(SignalMessage::JoinRoom { room_id }) => RoomRequest::Join(room_id),
        Ok(SignalMessage::JoinOrCreateRoom { room_id }) => RoomRequest::JoinOrCreate(room_id),
        Ok(other) => {
            return Ok(InboundFrame::Opaque {
                kind: other.kind().to_owned(),
            });
        }
        Err(source) => return Err(FrameError::BadRequest { kind, source }),
    };
    Ok(InboundFrame::Room(request))
}
