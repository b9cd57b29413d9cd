use futures::StreamExt;
use futures::channel::mpsc;
use tether_core::game::{Match, Move};
use tether_core::utils::DEFAULT_STUN_ADDR;
use tether_core::{NegotiationSession, SessionEvent, SignalMessage};
use wasm_bindgen::prelude::*;

use crate::logger::Logger;
use crate::ui::Ui;

mod create_pc_impl;
mod game_impl;
mod handle_signal_impl;
mod peer_transport;
mod setup_data_channel_impl;
mod ws_setup_impl;

pub use peer_transport::BrowserTransport;
pub use ws_setup_impl::SocketSink;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub signaling_url: String,
    pub ice_servers: Vec<String>,
}

impl EngineConfig {
    /// Signaling endpoint on the host that served the page.
    pub fn from_location(location: &web_sys::Location) -> Result<Self, JsValue> {
        Ok(Self {
            signaling_url: signaling_url(&location.protocol()?, &location.host()?),
            ice_servers: vec![DEFAULT_STUN_ADDR.to_owned()],
        })
    }
}

fn signaling_url(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws")
}

/// Everything the driver reacts to. Callbacks only ever enqueue these.
pub enum ShellEvent {
    SocketOpen,
    SocketClosed,
    /// Frame from the signaling socket, already parsed.
    Server(SignalMessage),
    /// Room request triggered from the lobby.
    Request(SignalMessage),
    Session(SessionEvent),
    /// The responder learned about the initiator's channel.
    ChannelAnnounced(web_sys::RtcDataChannel),
    /// Text received on the game channel.
    Remote(String),
    Play(Move),
}

pub type EventSender = mpsc::UnboundedSender<ShellEvent>;

type Session = NegotiationSession<BrowserTransport, SocketSink>;

/// Session Shell: owns the signaling socket, the negotiation session and the match.
pub struct ClientEngine {
    config: EngineConfig,
    ws: web_sys::WebSocket,
    ui: Ui,
    events_tx: EventSender,
    deep_link: Option<String>,
    session: Option<Session>,
    channel: Option<web_sys::RtcDataChannel>,
    game: Match,
}

impl ClientEngine {
    /// Open the signaling socket and spawn the driver.
    pub fn launch(config: EngineConfig, ui: Ui, deep_link: Option<String>) -> Result<(), JsValue> {
        let (events_tx, events_rx) = mpsc::unbounded();

        let ws = Self::ws_setup(&config, &events_tx)?;
        ui.wire(&events_tx)?;
        ui.set_moves_enabled(false);

        let engine = ClientEngine {
            config,
            ws,
            ui,
            events_tx,
            deep_link,
            session: None,
            channel: None,
            game: Match::new(),
        };

        wasm_bindgen_futures::spawn_local(engine.run(events_rx));
        Ok(())
    }

    async fn run(mut self, mut events_rx: mpsc::UnboundedReceiver<ShellEvent>) {
        Logger::info("Shell driver started");
        while let Some(event) = events_rx.next().await {
            self.handle(event).await;
        }
        Logger::info("Shell driver stopped");
    }

    async fn handle(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::SocketOpen => {
                if let Some(room_id) = self.deep_link.take() {
                    Logger::info(&format!("Deep link to room {}", room_id));
                    self.send_request(SignalMessage::JoinOrCreateRoom {
                        room_id: room_id.into(),
                    });
                }
            }
            ShellEvent::SocketClosed => {
                Logger::warn("Signaling socket closed");
                if self.session.is_none() {
                    self.ui.set_lobby_status("Connection to the server was lost");
                }
            }
            ShellEvent::Server(msg) => self.handle_signal(msg).await,
            ShellEvent::Request(msg) => self.send_request(msg),
            ShellEvent::Session(event) => self.dispatch(event).await,
            ShellEvent::ChannelAnnounced(dc) => self.setup_data_channel(dc),
            ShellEvent::Remote(text) => self.on_remote_move(&text).await,
            ShellEvent::Play(mv) => self.on_local_move(mv).await,
        }
    }

    fn send_request(&self, msg: SignalMessage) {
        match msg.to_json() {
            Ok(json) => {
                if let Err(e) = self.ws.send_with_str(&json) {
                    Logger::error("Failed to send room request", &e);
                }
            }
            Err(e) => Logger::warn(&format!("Failed to encode {}: {}", msg.kind(), e)),
        }
    }

    /// Feed one event to the running session. Rejections are logged and leave it untouched.
    async fn dispatch(&mut self, event: SessionEvent) {
        let Some(session) = self.session.as_mut() else {
            Logger::debug("No session running, event dropped");
            return;
        };

        if let Err(e) = session.handle(event).await {
            Logger::warn(&format!("Session rejected input: {}", e));
        }
        self.refresh_moves();
    }

    fn session_open(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.is_closed() && s.channel_state() == tether_core::ChannelState::Open)
    }
}
