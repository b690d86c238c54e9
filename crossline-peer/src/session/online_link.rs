use crate::signaling::{NegotiationState, Role, RoomLease, SignalEvent, SignalingExchange};
use crate::transport::{ChannelError, LinkId, PeerChannel, TransportConfig, TransportEvent};
use anyhow::Result;
use crossline_core::{IceCandidate, MoveMessage, RoomId, SessionDescription, Symbol};
use crossline_store::SignalingStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use webrtc::data_channel::RTCDataChannel;

/// Everything one host or join attempt owns: the peer connection, the
/// store watchers, the negotiation progress and the room record.
pub(crate) struct OnlineLink {
    role: Role,
    room: RoomId,
    channel: PeerChannel,
    exchange: SignalingExchange,
    negotiation: NegotiationState,
    pending_candidates: Vec<IceCandidate>,
    lease: Option<RoomLease>,
    lost: bool,
}

impl OnlineLink {
    pub async fn host(
        link: LinkId,
        room: RoomId,
        store: Arc<dyn SignalingStore>,
        config: &TransportConfig,
        transport_tx: mpsc::Sender<TransportEvent>,
        signal_tx: mpsc::Sender<SignalEvent>,
    ) -> Result<Self> {
        let mut channel = PeerChannel::new(link, config, transport_tx).await?;
        channel.open_channel().await?;
        let offer = channel.create_offer().await?;

        let mut this = Self::assemble(Role::Host, link, room, store, channel, signal_tx);
        this.exchange.publish_offer(&offer).await?;
        this.negotiation.offer_published()?;
        this.exchange.watch_remote_description().await?;
        this.exchange.watch_remote_candidates().await?;

        info!("Hosting room {} on link {}", this.room, link);
        Ok(this)
    }

    pub async fn join(
        link: LinkId,
        room: RoomId,
        store: Arc<dyn SignalingStore>,
        config: &TransportConfig,
        transport_tx: mpsc::Sender<TransportEvent>,
        signal_tx: mpsc::Sender<SignalEvent>,
    ) -> Result<Self> {
        let channel = PeerChannel::new(link, config, transport_tx).await?;

        let mut this = Self::assemble(Role::Joiner, link, room, store, channel, signal_tx);
        this.negotiation.watching_offer()?;
        this.exchange.watch_remote_description().await?;

        info!("Joining room {} on link {}", this.room, link);
        Ok(this)
    }

    fn assemble(
        role: Role,
        link: LinkId,
        room: RoomId,
        store: Arc<dyn SignalingStore>,
        channel: PeerChannel,
        signal_tx: mpsc::Sender<SignalEvent>,
    ) -> Self {
        let exchange = SignalingExchange::new(link, role, &room, Arc::clone(&store), signal_tx);
        // Taken before anything is written so a failed setup still cleans up.
        let lease = RoomLease::new(room.clone(), store);
        Self {
            role,
            room,
            channel,
            exchange,
            negotiation: NegotiationState::default(),
            pending_candidates: Vec::new(),
            lease: Some(lease),
            lost: false,
        }
    }

    pub fn id(&self) -> LinkId {
        self.channel.link()
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn local_symbol(&self) -> Symbol {
        self.role.local_symbol()
    }

    pub fn is_connected(&self) -> bool {
        self.negotiation == NegotiationState::Connected
    }

    /// Returns true only for the first report of a dropped connection.
    pub fn mark_lost(&mut self) -> bool {
        !std::mem::replace(&mut self.lost, true)
    }

    /// Joiner side. Returns false when an offer was already handled.
    pub async fn accept_offer(&mut self, offer: &SessionDescription) -> Result<bool> {
        if let Err(e) = self.negotiation.offer_received() {
            debug!("Offer for room {} ignored: {}", self.room, e);
            return Ok(false);
        }

        let answer = self.channel.accept_offer(offer).await?;
        self.exchange.publish_answer(&answer).await?;
        self.flush_pending_candidates().await;
        self.exchange.watch_remote_candidates().await?;
        Ok(true)
    }

    /// Host side. Returns false when an answer was already applied.
    pub async fn accept_answer(&mut self, answer: &SessionDescription) -> Result<bool> {
        if let Err(e) = self.negotiation.answer_received() {
            debug!("Answer for room {} ignored: {}", self.room, e);
            return Ok(false);
        }

        self.channel.apply_answer(answer).await?;
        self.flush_pending_candidates().await;
        Ok(true)
    }

    pub async fn add_remote_candidate(&mut self, candidate: IceCandidate) {
        if !self.negotiation.has_remote_description() {
            self.pending_candidates.push(candidate);
            return;
        }
        if let Err(e) = self.channel.add_ice_candidate(&candidate).await {
            warn!("Failed to add remote candidate for room {}: {:?}", self.room, e);
        }
    }

    async fn flush_pending_candidates(&mut self) {
        let pending = std::mem::take(&mut self.pending_candidates);
        if !pending.is_empty() {
            debug!("Applying {} buffered candidates", pending.len());
        }
        for candidate in pending {
            if let Err(e) = self.channel.add_ice_candidate(&candidate).await {
                warn!("Failed to add remote candidate for room {}: {:?}", self.room, e);
            }
        }
    }

    pub async fn publish_candidate(&self, candidate: &IceCandidate) {
        if let Err(e) = self.exchange.publish_candidate(candidate).await {
            warn!("Failed to publish local candidate for room {}: {}", self.room, e);
        }
    }

    /// Returns false if the channel was already open.
    pub fn channel_opened(&mut self, dc: Arc<RTCDataChannel>) -> bool {
        if let Err(e) = self.negotiation.channel_opened() {
            debug!("Channel open on room {} ignored: {}", self.room, e);
            return false;
        }
        self.channel.attach(dc);
        true
    }

    pub async fn send(&self, msg: &MoveMessage) -> Result<(), ChannelError> {
        self.channel.send(msg).await
    }

    pub async fn close(mut self) {
        self.exchange.stop();
        if let Err(e) = self.channel.close().await {
            warn!("Failed to close peer connection for room {}: {:?}", self.room, e);
        }
        if let Some(lease) = self.lease.take() {
            lease.release().await;
        }
    }
}
