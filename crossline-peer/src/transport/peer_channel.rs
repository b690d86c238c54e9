use crate::transport::transport_config::TransportConfig;
use crate::transport::transport_event::{LinkId, TransportEvent};
use anyhow::{Context, Result};
use bytes::Bytes;
use crossline_core::{IceCandidate, MoveMessage, SessionDescription, WireError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_message::DataChannelMessage;
use webrtc::data_channel::data_channel_state::RTCDataChannelState;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("data channel is not open")]
    NotOpen,
    #[error("data channel send failed: {0}")]
    Send(#[from] webrtc::Error),
    #[error(transparent)]
    Encode(#[from] WireError),
}

/// One WebRTC peer connection carrying a single ordered data channel.
///
/// Every callback reports into `event_tx`, tagged with the link id, so the
/// session loop stays the only owner of game and negotiation state.
pub struct PeerChannel {
    link: LinkId,
    label: String,
    peer_connection: Arc<RTCPeerConnection>,
    data_channel: Option<Arc<RTCDataChannel>>,
    event_tx: mpsc::Sender<TransportEvent>,
}

impl PeerChannel {
    pub async fn new(
        link: LinkId,
        config: &TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );

        let state_tx = event_tx.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!("Peer connection state of link {} changed: {:?}", link, s);
                    match s {
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            let _ = tx.send(TransportEvent::Disconnected(link)).await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let _ = tx
                    .send(TransportEvent::CandidateGenerated(link, from_init(init)))
                    .await;
            })
        }));

        // Only the joining side sees this; the host creates the channel itself.
        let dc_tx = event_tx.clone();
        peer_connection.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
            let tx = dc_tx.clone();

            Box::pin(async move {
                debug!("Remote data channel '{}' announced on link {}", dc.label(), link);
                wire_channel(link, &dc, tx);
            })
        }));

        Ok(Self {
            link,
            label: config.channel_label.clone(),
            peer_connection,
            data_channel: None,
            event_tx,
        })
    }

    pub fn link(&self) -> LinkId {
        self.link
    }

    /// Creates the game channel. Called by the hosting side before the offer.
    pub async fn open_channel(&mut self) -> Result<()> {
        let dc = self
            .peer_connection
            .create_data_channel(&self.label, None)
            .await?;
        wire_channel(self.link, &dc, self.event_tx.clone());
        self.data_channel = Some(dc);
        Ok(())
    }

    /// Adopts a channel reported open through [`TransportEvent::ChannelOpen`].
    pub fn attach(&mut self, dc: Arc<RTCDataChannel>) {
        self.data_channel = Some(dc);
    }

    pub fn is_open(&self) -> bool {
        self.data_channel
            .as_ref()
            .is_some_and(|dc| dc.ready_state() == RTCDataChannelState::Open)
    }

    /// Create an offer and install it as the local description.
    pub async fn create_offer(&self) -> Result<SessionDescription> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    /// Apply the remote offer, then create and install the answer.
    pub async fn accept_offer(&self, offer: &SessionDescription) -> Result<SessionDescription> {
        let desc = RTCSessionDescription::offer(offer.sdp.clone())?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .context("Failed to apply remote offer")?;

        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    pub async fn apply_answer(&self, answer: &SessionDescription) -> Result<()> {
        let desc = RTCSessionDescription::answer(answer.sdp.clone())?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .context("Failed to apply remote answer")?;
        Ok(())
    }

    pub async fn add_ice_candidate(&self, candidate: &IceCandidate) -> Result<()> {
        self.peer_connection
            .add_ice_candidate(to_init(candidate))
            .await?;
        Ok(())
    }

    pub async fn send(&self, msg: &MoveMessage) -> Result<(), ChannelError> {
        let dc = self
            .data_channel
            .as_ref()
            .filter(|dc| dc.ready_state() == RTCDataChannelState::Open)
            .ok_or(ChannelError::NotOpen)?;
        dc.send_text(msg.to_json()?).await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

fn wire_channel(link: LinkId, dc: &Arc<RTCDataChannel>, tx: mpsc::Sender<TransportEvent>) {
    let dc_on_open = Arc::clone(dc);
    let tx_open = tx.clone();
    dc.on_open(Box::new(move || {
        let tx = tx_open.clone();
        let channel_ready = Arc::clone(&dc_on_open);

        Box::pin(async move {
            info!("Data channel '{}' open on link {}", channel_ready.label(), link);
            let _ = tx
                .send(TransportEvent::ChannelOpen(link, channel_ready))
                .await;
        })
    }));

    dc.on_message(Box::new(move |msg: DataChannelMessage| {
        let tx = tx.clone();
        Box::pin(async move {
            let bytes = Bytes::from(msg.data.to_vec());
            let _ = tx.send(TransportEvent::Message(link, bytes)).await;
        })
    }));
}

fn from_init(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_mline_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}

fn to_init(candidate: &IceCandidate) -> RTCIceCandidateInit {
    RTCIceCandidateInit {
        candidate: candidate.candidate.clone(),
        sdp_mid: candidate.sdp_mid.clone(),
        sdp_mline_index: candidate.sdp_mline_index,
        username_fragment: candidate.username_fragment.clone(),
    }
}
