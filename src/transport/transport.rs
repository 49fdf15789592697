use crate::ChannelId;
use crate::PlayerId;

/// Delivery failure reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// Worth retrying, e.g. an upstream 502.
    #[error("transient delivery failure: {0}")]
    Transient(String),
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// The chat platform as seen by the room.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, channel: &ChannelId, text: &str) -> Result<(), DeliveryError>;
    /// Look up or create the direct channel to a player.
    async fn open_private(&self, player: &PlayerId) -> Result<ChannelId, DeliveryError>;
}
