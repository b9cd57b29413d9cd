use async_trait::async_trait;
use tether_core::{IceCandidate, PeerTransport, SdpKind, SessionDescription, TransportError};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{RtcIceCandidateInit, RtcPeerConnection, RtcSdpType, RtcSessionDescriptionInit};

fn js_err(e: JsValue) -> TransportError {
    TransportError::new(format!("{:?}", e))
}

/// `RTCPeerConnection` behind the negotiation session.
pub struct BrowserTransport {
    pub(super) pc: RtcPeerConnection,
}

impl BrowserTransport {
    async fn description(promise: js_sys::Promise, kind: SdpKind) -> Result<SessionDescription, TransportError> {
        let value = JsFuture::from(promise).await.map_err(js_err)?;
        let sdp = js_sys::Reflect::get(&value, &"sdp".into())
            .map_err(js_err)?
            .as_string()
            .ok_or_else(|| TransportError::new("description without sdp"))?;
        Ok(SessionDescription { kind, sdp })
    }

    fn native(desc: &SessionDescription) -> RtcSessionDescriptionInit {
        let sdp_type = match desc.kind {
            SdpKind::Offer => RtcSdpType::Offer,
            SdpKind::Answer => RtcSdpType::Answer,
        };
        let init = RtcSessionDescriptionInit::new(sdp_type);
        init.set_sdp(&desc.sdp);
        init
    }
}

#[async_trait(?Send)]
impl PeerTransport for BrowserTransport {
    async fn create_offer(&self) -> Result<SessionDescription, TransportError> {
        Self::description(self.pc.create_offer(), SdpKind::Offer).await
    }

    async fn create_answer(&self) -> Result<SessionDescription, TransportError> {
        Self::description(self.pc.create_answer(), SdpKind::Answer).await
    }

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), TransportError> {
        JsFuture::from(self.pc.set_local_description(&Self::native(&desc)))
            .await
            .map(|_| ())
            .map_err(js_err)
    }

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), TransportError> {
        JsFuture::from(self.pc.set_remote_description(&Self::native(&desc)))
            .await
            .map(|_| ())
            .map_err(js_err)
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), TransportError> {
        let init = RtcIceCandidateInit::new(&candidate.candidate);
        init.set_sdp_mid(candidate.sdp_mid.as_deref());
        init.set_sdp_m_line_index(candidate.sdp_m_line_index);
        if let Some(ufrag) = candidate.username_fragment.as_deref() {
            let _ = js_sys::Reflect::set(&init, &"usernameFragment".into(), &ufrag.into());
        }

        let promise = self
            .pc
            .add_ice_candidate_with_opt_rtc_ice_candidate_init(Some(&init));
        JsFuture::from(promise).await.map(|_| ()).map_err(js_err)
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.pc.close();
        Ok(())
    }
}
