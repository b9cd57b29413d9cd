use tether_core::{NegotiationRole, NegotiationSession, SessionEvent, SignalMessage};
use tether_core::utils::GAME_CHANNEL_LABEL;

use crate::engine::{ClientEngine, SocketSink};
use crate::logger::Logger;

impl ClientEngine {
    pub(super) async fn handle_signal(&mut self, msg: SignalMessage) {
        match msg {
            SignalMessage::RoomCreated { room_id } => {
                self.ui.set_lobby_status(&format!(
                    "Room {} created. Waiting for a player to join...",
                    room_id
                ));
            }
            SignalMessage::RoomJoined { room_id } => {
                self.ui
                    .set_lobby_status(&format!("Joined room {}. Starting game...", room_id));
                self.start_game(NegotiationRole::Responder).await;
            }
            SignalMessage::PlayerJoined => {
                self.ui
                    .set_lobby_status("A player has joined your room. Starting game...");
                self.start_game(NegotiationRole::Initiator).await;
            }
            SignalMessage::Error { message } => {
                self.ui.set_lobby_status(&format!("Error: {}", message));
            }
            SignalMessage::PeerLeft => {
                self.ui.set_game_status("Your opponent left the game.");
                self.dispatch(SessionEvent::Close).await;
            }
            msg if msg.is_room_request() => {
                Logger::debug(&format!("Ignoring relayed {} from opponent", msg.kind()));
            }
            msg if msg.is_negotiation() => {
                if self.session.is_none() {
                    Logger::warn(&format!("No session for {}, dropped", msg.kind()));
                    return;
                }
                self.dispatch(SessionEvent::Signal(msg)).await;
            }
            other => Logger::warn(&format!("Unexpected {} from server", other.kind())),
        }
    }

    /// Room is ready: switch panels, build the peer connection and kick off negotiation.
    async fn start_game(&mut self, role: NegotiationRole) {
        if self.session.is_some() {
            Logger::warn("Game already started");
            return;
        }

        self.ui.show_game();

        let transport = match self.create_pc() {
            Ok(transport) => transport,
            Err(e) => {
                Logger::error("Failed to create peer connection", &e);
                self.ui.set_game_status("Could not set up the connection.");
                return;
            }
        };

        if role == NegotiationRole::Initiator {
            let dc = transport.pc.create_data_channel(GAME_CHANNEL_LABEL);
            self.setup_data_channel(dc);
        }

        let sink = SocketSink::new(self.ws.clone());
        self.session = Some(NegotiationSession::new(role, transport, sink));
        self.ui.set_game_status("Connecting to your opponent...");
        self.dispatch(SessionEvent::Start).await;
    }
}
