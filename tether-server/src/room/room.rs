use std::time::{Duration, Instant};
use tether_core::{ConnectionId, Role, RoomId};

/// A two-seat pairing slot. Rooms never expire; they live until a member leaves.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub host: ConnectionId,
    pub guest: Option<ConnectionId>,
    pub created_at: Instant,
}

impl Room {
    pub fn new(id: RoomId, host: ConnectionId) -> Self {
        Self {
            id,
            host,
            guest: None,
            created_at: Instant::now(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.guest.is_some()
    }

    pub fn role_of(&self, conn: ConnectionId) -> Option<Role> {
        if self.host == conn {
            Some(Role::Host)
        } else if self.guest == Some(conn) {
            Some(Role::Guest)
        } else {
            None
        }
    }

    /// The other member, if seated.
    pub fn peer_of(&self, conn: ConnectionId) -> Option<ConnectionId> {
        match self.role_of(conn)? {
            Role::Host => self.guest,
            Role::Guest => Some(self.host),
        }
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
