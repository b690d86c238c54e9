use crate::error::RoomIdError;
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Identifier of a signaling room, chosen by the host and shared out of band.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub const MIN_LEN: usize = 6;
    const GENERATED_LEN: usize = 8;
    /// Query parameter used in share links.
    pub const LINK_PARAM: &'static str = "room";

    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        Self(raw[..Self::GENERATED_LEN].to_owned())
    }

    /// Accepts either a bare id or a link with a `?room=` parameter.
    pub fn parse(input: &str) -> Result<Self, RoomIdError> {
        let input = input.trim();
        if input.contains("://") {
            return Self::from_link(input);
        }
        Self::validate(input)
    }

    pub fn from_link(link: &str) -> Result<Self, RoomIdError> {
        let url = Url::parse(link).map_err(|_| RoomIdError::MissingParameter(link.to_owned()))?;
        let room = url
            .query_pairs()
            .find(|(key, _)| key == Self::LINK_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| RoomIdError::MissingParameter(link.to_owned()))?;
        Self::validate(&room)
    }

    fn validate(raw: &str) -> Result<Self, RoomIdError> {
        if raw.len() >= Self::MIN_LEN && raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(RoomIdError::Invalid(raw.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{base}?room={id}`, keeping any other query parameters of `base`.
    pub fn share_link(&self, base: &str) -> Option<String> {
        let mut url = Url::parse(base).ok()?;
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != Self::LINK_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(Self::LINK_PARAM, &self.0);
        Some(url.to_string())
    }

    pub fn paths(&self) -> RoomPaths {
        RoomPaths {
            root: format!("rooms/{}", self.0),
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store locations of one room record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPaths {
    root: String,
}

impl RoomPaths {
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn offer(&self) -> String {
        format!("{}/offer", self.root)
    }

    pub fn answer(&self) -> String {
        format!("{}/answer", self.root)
    }

    pub fn offer_candidates(&self) -> String {
        format!("{}/offerCandidates", self.root)
    }

    pub fn answer_candidates(&self) -> String {
        format!("{}/answerCandidates", self.root)
    }
}
