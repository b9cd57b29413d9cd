use crate::room::{AdmissionError, Room};
use std::collections::HashMap;
use tether_core::{ConnectionId, RoomId};
use tracing::info;

pub const DEFAULT_MAX_ROOMS: usize = 50;

/// Result of a successful join-or-create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Created,
    Joined { host: ConnectionId },
}

/// Every live room, keyed by its id. Owned by the relay actor; never shared.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    max_rooms: usize,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROOMS)
    }
}

impl RoomRegistry {
    pub fn new(max_rooms: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            max_rooms,
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn max_rooms(&self) -> usize {
        self.max_rooms
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn check_create(&self, room_id: &RoomId) -> Result<(), AdmissionError> {
        if self.rooms.contains_key(room_id) {
            return Err(AdmissionError::RoomExists);
        }
        if self.rooms.len() >= self.max_rooms {
            return Err(AdmissionError::AtCapacity);
        }
        Ok(())
    }

    /// Host of the room a guest could join right now.
    pub fn check_join(&self, room_id: &RoomId) -> Result<ConnectionId, AdmissionError> {
        match self.rooms.get(room_id) {
            Some(room) if !room.is_full() => Ok(room.host),
            _ => Err(AdmissionError::Unavailable(room_id.clone())),
        }
    }

    pub fn check_join_or_create(&self, room_id: &RoomId) -> Result<(), AdmissionError> {
        if self.rooms.contains_key(room_id) {
            self.check_join(room_id).map(|_| ())
        } else {
            self.check_create(room_id)
        }
    }

    pub fn create(&mut self, room_id: RoomId, host: ConnectionId) -> Result<(), AdmissionError> {
        self.check_create(&room_id)?;

        info!("Room {} created by {}", room_id, host);
        self.rooms.insert(room_id.clone(), Room::new(room_id, host));
        Ok(())
    }

    /// Seat `guest` and return the host it is now paired with.
    pub fn join(
        &mut self,
        room_id: &RoomId,
        guest: ConnectionId,
    ) -> Result<ConnectionId, AdmissionError> {
        let host = self.check_join(room_id)?;
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.guest = Some(guest);
        }

        info!("Room {} joined by {}", room_id, guest);
        Ok(host)
    }

    pub fn join_or_create(
        &mut self,
        room_id: RoomId,
        conn: ConnectionId,
    ) -> Result<Admission, AdmissionError> {
        if self.rooms.contains_key(&room_id) {
            let host = self.join(&room_id, conn)?;
            Ok(Admission::Joined { host })
        } else {
            self.create(room_id, conn)?;
            Ok(Admission::Created)
        }
    }

    pub fn remove(&mut self, room_id: &RoomId) -> Option<Room> {
        let room = self.rooms.remove(room_id)?;
        info!("Room {} removed after {:?}", room_id, room.age());
        Some(room)
    }

    /// Drop every room; returns how many were live.
    pub fn teardown(&mut self) -> usize {
        let count = self.rooms.len();
        self.rooms.clear();
        count
    }
}
