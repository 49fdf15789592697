use crate::ChannelId;
use crate::Chips;
use crate::PlayerId;
use crate::SessionId;
use crate::session::Move;
use crate::session::Patron;
use tokio::sync::oneshot;

/// Everything the casino can be asked to do.
#[derive(Debug)]
pub enum Event {
    CreateSession {
        channel: ChannelId,
        patron: Patron,
        buy_in: Chips,
        small: Chips,
        big: Chips,
    },
    AddPlayer {
        channel: ChannelId,
        patron: Patron,
        buy_in: Chips,
    },
    RemovePlayer {
        channel: ChannelId,
        player: PlayerId,
    },
    Action {
        channel: ChannelId,
        player: PlayerId,
        mv: Move,
    },
    StartSession {
        channel: ChannelId,
        player: PlayerId,
    },
    StopSessionAfterRound {
        channel: ChannelId,
        player: PlayerId,
    },
    /// Sent by a session whose round loop has finished.
    DestroySession {
        channel: ChannelId,
        session: SessionId,
    },
    ChangeSettings {
        channel: ChannelId,
        player: PlayerId,
        settings: Vec<(String, String)>,
    },
    KickPlayer {
        channel: ChannelId,
        player: PlayerId,
        target: PlayerId,
    },
    BanPlayer {
        channel: ChannelId,
        player: PlayerId,
        target: PlayerId,
    },
    PrintInfo {
        channel: ChannelId,
    },
    /// `done` fires once every table has been settled.
    ShutdownRequest {
        done: oneshot::Sender<()>,
    },
}
