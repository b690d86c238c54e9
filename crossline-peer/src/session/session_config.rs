use crate::transport::TransportConfig;

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub transport: TransportConfig,
    /// Base URL the shareable `?room=` link is built on. No link is offered
    /// when unset.
    pub share_base_url: Option<String>,
}
