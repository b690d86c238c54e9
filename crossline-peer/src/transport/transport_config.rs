use crossline_core::IceServerConfig;

pub const DEFAULT_STUN_SERVER: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_CHANNEL_LABEL: &str = "moves";

/// WebRTC settings for one peer link.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub ice_servers: Vec<IceServerConfig>,
    pub channel_label: String,
}

impl TransportConfig {
    /// No STUN or TURN servers; host candidates only. Enough for two peers
    /// on the same machine or LAN.
    pub fn local_only() -> Self {
        Self {
            ice_servers: Vec::new(),
            ..Self::default()
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_SERVER)],
            channel_label: DEFAULT_CHANNEL_LABEL.to_owned(),
        }
    }
}
