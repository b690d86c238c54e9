use bytes::Bytes;
use crossline_core::IceCandidate;
use std::sync::Arc;
use webrtc::data_channel::RTCDataChannel;

/// Identifies one peer link within a session. A new id is taken for every
/// host or join attempt so late callbacks of a closed link can be told apart.
pub type LinkId = u64;

pub enum TransportEvent {
    ChannelOpen(LinkId, Arc<RTCDataChannel>),
    Disconnected(LinkId),
    Message(LinkId, Bytes),
    CandidateGenerated(LinkId, IceCandidate),
}

impl TransportEvent {
    pub fn link(&self) -> LinkId {
        match self {
            TransportEvent::ChannelOpen(link, _)
            | TransportEvent::Disconnected(link)
            | TransportEvent::Message(link, _)
            | TransportEvent::CandidateGenerated(link, _) => *link,
        }
    }
}
