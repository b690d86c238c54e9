use crate::transport::LinkId;
use crossline_core::{IceCandidate, SessionDescription};

/// Remote signaling records observed in the store.
#[derive(Debug, Clone)]
pub enum SignalEvent {
    Offer(LinkId, SessionDescription),
    Answer(LinkId, SessionDescription),
    RemoteCandidate(LinkId, IceCandidate),
}

impl SignalEvent {
    pub fn link(&self) -> LinkId {
        match self {
            SignalEvent::Offer(link, _)
            | SignalEvent::Answer(link, _)
            | SignalEvent::RemoteCandidate(link, _) => *link,
        }
    }
}
