use tether_core::RoomId;
use thiserror::Error;

/// Rejected room requests. `Display` is the exact `message` sent back on the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Room already exists")]
    RoomExists,

    #[error("Too many ongoing rooms")]
    AtCapacity,

    #[error("Room {0} is full or does not exist")]
    Unavailable(RoomId),

    #[error("Already in room {0}")]
    AlreadyInRoom(RoomId),
}
