use crate::Chips;
use crate::PlayerId;

/// Bad input from a player. Never fatal, never retried.
/// The `Display` text is what gets sent back to the originating channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("There's already a game running in this channel")]
    SessionExists,
    #[error("No table here")]
    NoSession,
    #[error("You don't have enough money")]
    InsufficientFunds,
    #[error("No available seats :(")]
    NoFreeSeat,
    #[error("Error joining table: {0}")]
    Seat(String),
    #[error("You're banned from this table")]
    Banned,
    #[error("Only the table owner can do that")]
    NotOwner,
    #[error("You're not in the game")]
    NotSeated,
    #[error("The table is already running")]
    AlreadyRunning,
    #[error("Get at least 2 people to join before you can start")]
    NotEnoughPlayers,
    #[error("Can't change settings while the table is running")]
    Running,
    #[error("You can't do that")]
    IllegalAction,
    #[error("Try again by also specifying amount")]
    MissingAmount,
    #[error("Failed parsing number >:O")]
    MalformedAmount,
    #[error("Amount must be between {min} and {max}")]
    AmountOutOfRange { min: Chips, max: Chips },
    #[error("Couldn't change settings: {0}")]
    Setting(String),
    #[error("Bot is shutting down")]
    ShuttingDown,
}

/// A broken invariant between the session and the engine.
/// Aborts the current step and is logged loudly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Fault {
    #[error("seat occupant {0} is not registered with the session")]
    UnknownOccupant(PlayerId),
}
