use tether_core::SessionEvent;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::engine::{ClientEngine, ShellEvent};
use crate::logger::Logger;

impl ClientEngine {
    /// Route the channel's callbacks into the event queue and keep it for sending moves.
    pub(super) fn setup_data_channel(&mut self, dc: web_sys::RtcDataChannel) {
        let on_msg = {
            let events_tx = self.events_tx.clone();
            Closure::<dyn FnMut(web_sys::MessageEvent)>::wrap(Box::new(
                move |ev: web_sys::MessageEvent| match ev.data().as_string() {
                    Some(text) => {
                        let _ = events_tx.unbounded_send(ShellEvent::Remote(text));
                    }
                    None => Logger::warn("Ignoring binary game message"),
                },
            ))
        };
        dc.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));
        on_msg.forget();

        let on_open = {
            let events_tx = self.events_tx.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Logger::info("DataChannel OPEN");
                let _ = events_tx.unbounded_send(ShellEvent::Session(SessionEvent::ChannelOpen));
            }))
        };
        dc.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let on_close = {
            let events_tx = self.events_tx.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Logger::info("DataChannel CLOSED");
                let _ = events_tx.unbounded_send(ShellEvent::Session(SessionEvent::ChannelClosed));
            }))
        };
        dc.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        let on_error = {
            let events_tx = self.events_tx.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |err: JsValue| {
                Logger::error("DataChannel error", &err);
                let _ = events_tx.unbounded_send(ShellEvent::Session(
                    SessionEvent::TransportFailed("data channel error".into()),
                ));
            }))
        };
        dc.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();

        // The remote channel may already be open by the time the driver gets here.
        if dc.ready_state() == web_sys::RtcDataChannelState::Open {
            let _ = self
                .events_tx
                .unbounded_send(ShellEvent::Session(SessionEvent::ChannelOpen));
        }

        self.channel = Some(dc);
    }
}
