use crate::Position;

/// Errors reported by the game-rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The only seat error a joining player should keep scanning past.
    #[error("seat {0} is occupied")]
    SeatOccupied(Position),
    #[error("seat {0} does not exist")]
    NoSuchSeat(Position),
    #[error("player is already seated")]
    AlreadySeated,
    #[error("buy in must be positive")]
    InvalidBuyIn,
    #[error("no decision is pending")]
    NotWaiting,
    #[error("{0} is not allowed now")]
    IllegalAction(super::Action),
    #[error("amount must be between {min} and {max}")]
    InvalidAmount { min: crate::Chips, max: crate::Chips },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
