use crate::ChannelId;
use crate::PlayerId;

/// A chat line as delivered by the platform.
#[derive(Debug, Clone)]
pub struct Message {
    pub channel: ChannelId,
    pub author: PlayerId,
    pub name: String,
    pub content: String,
}
