use tether_core::{SignalMessage, SignalSink, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::WebSocket;

use crate::engine::{ClientEngine, EngineConfig, EventSender, ShellEvent};
use crate::logger::Logger;

impl ClientEngine {
    pub(super) fn ws_setup(config: &EngineConfig, events_tx: &EventSender) -> Result<WebSocket, JsValue> {
        let ws = WebSocket::new(&config.signaling_url)?;

        let onopen_callback = {
            let events_tx = events_tx.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Logger::info("WS Open");
                let _ = events_tx.unbounded_send(ShellEvent::SocketOpen);
            }))
        };
        ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
        onopen_callback.forget();

        let onmessage_callback = {
            let events_tx = events_tx.clone();
            Closure::<dyn FnMut(web_sys::MessageEvent)>::wrap(Box::new(
                move |e: web_sys::MessageEvent| {
                    let Some(text) = e.data().as_string() else {
                        Logger::warn("Ignoring non-text signaling frame");
                        return;
                    };
                    Logger::debug(&format!("WS IN: {}", text));
                    match serde_json::from_str::<SignalMessage>(&text) {
                        Ok(msg) => {
                            let _ = events_tx.unbounded_send(ShellEvent::Server(msg));
                        }
                        Err(e) => Logger::warn(&format!("JSON Error: {}. Text: {}", e, text)),
                    }
                },
            ))
        };
        ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
        onmessage_callback.forget();

        let onclose_callback = {
            let events_tx = events_tx.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                let _ = events_tx.unbounded_send(ShellEvent::SocketClosed);
            }))
        };
        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
        onclose_callback.forget();

        Ok(ws)
    }
}

/// Signaling socket as seen by the negotiation session.
pub struct SocketSink {
    ws: WebSocket,
}

impl SocketSink {
    pub fn new(ws: WebSocket) -> Self {
        Self { ws }
    }
}

impl SignalSink for SocketSink {
    fn send_signal(&self, msg: SignalMessage) -> Result<(), TransportError> {
        let json = msg
            .to_json()
            .map_err(|e| TransportError::new(e.to_string()))?;
        self.ws
            .send_with_str(&json)
            .map_err(|e| TransportError::new(format!("{:?}", e)))
    }
}
