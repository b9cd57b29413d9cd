use crate::relay::{InboundFrame, RelayCommand, RoomRequest, classify};
use crate::room::{Admission, AdmissionError, RoomRegistry};
use crate::signaling::SignalingOutput;
use std::collections::HashMap;
use std::sync::Arc;
use tether_core::{ConnectionId, RoomId, SignalMessage};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RelayOptions {
    /// Tell the remaining member with `peer_left` when its room is torn down.
    pub notify_peer_left: bool,
}

/// Actor that owns the room registry and the connection-to-room map.
///
/// All room state is mutated from [`SignalingRelay::run`] only, one command at a time.
pub struct SignalingRelay {
    registry: RoomRegistry,

    /// Room each assigned connection sits in. Absent means unassigned.
    memberships: HashMap<ConnectionId, RoomId>,

    command_rx: mpsc::Receiver<RelayCommand>,

    output: Arc<dyn SignalingOutput>,

    options: RelayOptions,
}

impl SignalingRelay {
    pub fn new(
        registry: RoomRegistry,
        command_rx: mpsc::Receiver<RelayCommand>,
        output: Arc<dyn SignalingOutput>,
        options: RelayOptions,
    ) -> Self {
        Self {
            registry,
            memberships: HashMap::new(),
            command_rx,
            output,
            options,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn room_of(&self, conn: ConnectionId) -> Option<&RoomId> {
        self.memberships.get(&conn)
    }

    /// Event loop; returns after `Shutdown` or once every sender is gone.
    pub async fn run(mut self) {
        info!(
            "Relay event loop started (max {} rooms)",
            self.registry.max_rooms()
        );

        loop {
            match self.command_rx.recv().await {
                Some(RelayCommand::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                Some(cmd) => self.handle_command(cmd).await,
                None => {
                    info!("Command channel closed. Shutting down relay.");
                    break;
                }
            }
        }

        let dropped = self.registry.teardown();
        self.memberships.clear();
        info!("Relay event loop finished, {} rooms dropped", dropped);
    }

    pub async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Inbound { conn, text } => self.handle_frame(conn, text).await,
            RelayCommand::Disconnect { conn } => self.disconnect(conn).await,
            RelayCommand::Shutdown => {}
        }
    }

    async fn handle_frame(&mut self, conn: ConnectionId, text: String) {
        let frame = match classify(&text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Dropping malformed frame from {}: {}", conn, e);
                return;
            }
        };

        match frame {
            InboundFrame::Room(request) => {
                let kind = request.kind();
                let was_member = self.memberships.contains_key(&conn);
                if let Err(e) = self.admit(conn, request).await {
                    info!("Rejected request from {}: {}", conn, e);
                    self.output
                        .send_message(conn, SignalMessage::error(e.to_string()))
                        .await;
                }
                // Members still get the frame relayed like any other message.
                if was_member {
                    self.forward(conn, kind, text).await;
                }
            }
            InboundFrame::Opaque { kind } => self.forward(conn, &kind, text).await,
        }
    }

    async fn admit(
        &mut self,
        conn: ConnectionId,
        request: RoomRequest,
    ) -> Result<(), AdmissionError> {
        match request {
            RoomRequest::Create(room_id) => {
                self.registry.check_create(&room_id)?;
                self.ensure_unassigned(conn)?;
                self.registry.create(room_id.clone(), conn)?;
                self.on_created(conn, room_id).await;
            }
            RoomRequest::Join(room_id) => {
                self.registry.check_join(&room_id)?;
                self.ensure_unassigned(conn)?;
                let host = self.registry.join(&room_id, conn)?;
                self.on_joined(conn, host, room_id).await;
            }
            RoomRequest::JoinOrCreate(room_id) => {
                self.registry.check_join_or_create(&room_id)?;
                self.ensure_unassigned(conn)?;
                match self.registry.join_or_create(room_id.clone(), conn)? {
                    Admission::Created => self.on_created(conn, room_id).await,
                    Admission::Joined { host } => self.on_joined(conn, host, room_id).await,
                }
            }
        }
        Ok(())
    }

    fn ensure_unassigned(&self, conn: ConnectionId) -> Result<(), AdmissionError> {
        match self.memberships.get(&conn) {
            Some(room_id) => Err(AdmissionError::AlreadyInRoom(room_id.clone())),
            None => Ok(()),
        }
    }

    async fn on_created(&mut self, host: ConnectionId, room_id: RoomId) {
        self.memberships.insert(host, room_id.clone());
        self.output
            .send_message(host, SignalMessage::RoomCreated { room_id })
            .await;
    }

    async fn on_joined(&mut self, guest: ConnectionId, host: ConnectionId, room_id: RoomId) {
        self.memberships.insert(guest, room_id.clone());
        self.output
            .send_message(host, SignalMessage::PlayerJoined)
            .await;
        self.output
            .send_message(guest, SignalMessage::RoomJoined { room_id })
            .await;
    }

    async fn forward(&self, conn: ConnectionId, kind: &str, text: String) {
        let Some(room_id) = self.memberships.get(&conn) else {
            warn!("Dropping '{}' from {}: not in a room", kind, conn);
            return;
        };
        let Some(peer) = self
            .registry
            .get(room_id)
            .and_then(|room| room.peer_of(conn))
        else {
            warn!("Dropping '{}' from {}: room {} has no peer yet", kind, conn, room_id);
            return;
        };

        debug!("Relaying '{}' {} -> {}", kind, conn, peer);
        self.output.send_text(peer, text).await;
    }

    async fn disconnect(&mut self, conn: ConnectionId) {
        let Some(room_id) = self.memberships.remove(&conn) else {
            debug!("Connection {} closed outside any room", conn);
            return;
        };
        let Some(room) = self.registry.remove(&room_id) else {
            return;
        };

        info!("Connection {} left, room {} closed", conn, room_id);

        let Some(peer) = room.peer_of(conn) else {
            return;
        };
        self.memberships.remove(&peer);

        if self.options.notify_peer_left {
            self.output.send_message(peer, SignalMessage::PeerLeft).await;
        }
    }
}
