use std::fmt;
use thiserror::Error;

/// Offer/answer progress of one peer link.
///
/// ```text
/// Idle -> AwaitingAnswer (host, offer published)
/// Idle -> AwaitingOffer  (joiner, watching the offer)
/// AwaitingAnswer | AwaitingOffer -> Answered -> Connected
/// ```
///
/// Each transition happens at most once, so a second offer or answer seen
/// in the store is rejected instead of being applied again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegotiationState {
    #[default]
    Idle,
    AwaitingAnswer,
    AwaitingOffer,
    Answered,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{step} is not valid while {state}")]
pub struct NegotiationError {
    pub step: NegotiationStep,
    pub state: NegotiationState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationStep {
    PublishOffer,
    WatchOffer,
    ReceiveOffer,
    ReceiveAnswer,
    OpenChannel,
}

impl NegotiationState {
    pub fn offer_published(&mut self) -> Result<(), NegotiationError> {
        self.advance(NegotiationStep::PublishOffer, Self::Idle, Self::AwaitingAnswer)
    }

    pub fn watching_offer(&mut self) -> Result<(), NegotiationError> {
        self.advance(NegotiationStep::WatchOffer, Self::Idle, Self::AwaitingOffer)
    }

    pub fn offer_received(&mut self) -> Result<(), NegotiationError> {
        self.advance(NegotiationStep::ReceiveOffer, Self::AwaitingOffer, Self::Answered)
    }

    pub fn answer_received(&mut self) -> Result<(), NegotiationError> {
        self.advance(NegotiationStep::ReceiveAnswer, Self::AwaitingAnswer, Self::Answered)
    }

    pub fn channel_opened(&mut self) -> Result<(), NegotiationError> {
        self.advance(NegotiationStep::OpenChannel, Self::Answered, Self::Connected)
    }

    /// Remote candidates can only be applied once this holds.
    pub fn has_remote_description(&self) -> bool {
        matches!(self, Self::Answered | Self::Connected)
    }

    fn advance(
        &mut self,
        step: NegotiationStep,
        from: NegotiationState,
        to: NegotiationState,
    ) -> Result<(), NegotiationError> {
        if *self != from {
            return Err(NegotiationError { step, state: *self });
        }
        *self = to;
        Ok(())
    }
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingAnswer => "awaiting answer",
            Self::AwaitingOffer => "awaiting offer",
            Self::Answered => "answered",
            Self::Connected => "connected",
        };
        f.write_str(name)
    }
}

impl fmt::Display for NegotiationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PublishOffer => "publishing an offer",
            Self::WatchOffer => "watching for an offer",
            Self::ReceiveOffer => "receiving an offer",
            Self::ReceiveAnswer => "receiving an answer",
            Self::OpenChannel => "opening the channel",
        };
        f.write_str(name)
    }
}
