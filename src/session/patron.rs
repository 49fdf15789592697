use crate::ChannelId;
use crate::PlayerId;

/// A player as the chat platform introduces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patron {
    pub id: PlayerId,
    pub name: String,
    /// Direct channel for hole cards.
    pub private: ChannelId,
}
