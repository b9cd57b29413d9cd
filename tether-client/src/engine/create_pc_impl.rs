use tether_core::{IceCandidate, SessionEvent};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::{RtcPeerConnection, RtcPeerConnectionState};

use crate::engine::{BrowserTransport, ClientEngine, ShellEvent};
use crate::logger::Logger;

impl ClientEngine {
    pub(super) fn create_pc(&self) -> Result<BrowserTransport, JsValue> {
        let rtc_config = web_sys::RtcConfiguration::new();

        let urls = js_sys::Array::new();
        for url in &self.config.ice_servers {
            urls.push(&JsValue::from_str(url));
        }
        let stun_server = web_sys::RtcIceServer::new();
        stun_server.set_urls(&urls);

        let ice_servers_arr = js_sys::Array::new();
        ice_servers_arr.push(&stun_server);
        rtc_config.set_ice_servers(&ice_servers_arr);

        let pc = RtcPeerConnection::new_with_configuration(&rtc_config)?;

        let events_tx = self.events_tx.clone();
        let onice = Closure::wrap(Box::new(move |ev: web_sys::RtcPeerConnectionIceEvent| {
            let Some(candidate) = ev.candidate() else {
                return;
            };
            let ufrag =
                js_sys::Reflect::get(candidate.as_ref(), &JsValue::from_str("usernameFragment"))
                    .ok()
                    .and_then(|v| v.as_string());
            let candidate = local_candidate(
                candidate.candidate(),
                candidate.sdp_mid(),
                candidate.sdp_m_line_index(),
                ufrag,
            );
            let _ = events_tx.unbounded_send(ShellEvent::Session(SessionEvent::LocalCandidate(
                candidate,
            )));
        })
            as Box<dyn FnMut(web_sys::RtcPeerConnectionIceEvent)>);
        pc.set_onicecandidate(Some(onice.as_ref().unchecked_ref()));
        onice.forget();

        let events_tx = self.events_tx.clone();
        let ondatachannel = Closure::wrap(Box::new(move |ev: web_sys::RtcDataChannelEvent| {
            let dc = ev.channel();
            Logger::info(&format!("Received DataChannel: {}", dc.label()));
            let _ = events_tx.unbounded_send(ShellEvent::ChannelAnnounced(dc));
        })
            as Box<dyn FnMut(web_sys::RtcDataChannelEvent)>);
        pc.set_ondatachannel(Some(ondatachannel.as_ref().unchecked_ref()));
        ondatachannel.forget();

        let events_tx = self.events_tx.clone();
        let pc_clone = pc.clone();
        let onstatechange = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
            let state = pc_clone.connection_state();
            Logger::debug(&format!("Peer connection state: {:?}", state));
            if state == RtcPeerConnectionState::Failed {
                let _ = events_tx.unbounded_send(ShellEvent::Session(
                    SessionEvent::TransportFailed("peer connection failed".into()),
                ));
            }
        }));
        pc.set_onconnectionstatechange(Some(onstatechange.as_ref().unchecked_ref()));
        onstatechange.forget();

        Ok(BrowserTransport { pc })
    }
}

/// Wire form of a gathered candidate. An empty ufrag is treated as absent.
fn local_candidate(
    candidate: String,
    sdp_mid: Option<String>,
    sdp_m_line_index: Option<u16>,
    username_fragment: Option<String>,
) -> IceCandidate {
    IceCandidate {
        candidate,
        sdp_mid,
        sdp_m_line_index,
        username_fragment: username_fragment.filter(|u| !u.is_empty()),
    }
}
