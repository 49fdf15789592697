use super::*;
use crate::Chips;
use crate::PlayerId;
use crate::Position;
use crate::cards::Card;
use std::sync::Arc;

/// A game-rules engine as seen by a session.
///
/// The session calls [`Rules::next`] repeatedly. Whenever [`Rules::current`]
/// names a seat, the session collects that seat's decision and hands it to
/// [`Rules::act`] before stepping again.
pub trait Rules: Send {
    fn config(&self) -> Config;
    fn set_config(&mut self, config: Config) -> Result<(), RulesError>;

    /// Seat a player with `buy_in` chips. Fails with
    /// [`RulesError::SeatOccupied`] when someone already sits there.
    fn sit(
        &mut self,
        player: Arc<dyn Identity>,
        seat: Position,
        buy_in: Chips,
    ) -> Result<(), RulesError>;
    /// Remove a player, returning the chips left in front of them.
    fn stand(&mut self, player: &PlayerId) -> Option<Chips>;

    /// Advance the game by one step.
    fn next(&mut self) -> Advance;
    /// Apply the pending decision. `chips` is the total put in by a bet or raise.
    fn act(&mut self, action: Action, chips: Chips) -> Result<(), RulesError>;

    fn players(&self) -> Vec<Seated>;
    /// The seat whose decision is pending, if any.
    fn current(&self) -> Option<Seated>;
    fn valid_actions(&self) -> Vec<Action>;
    /// Chips the current seat needs to call.
    fn outstanding(&self) -> Chips;
    /// Smallest total the current seat may put in with a bet or raise.
    fn min_raise(&self) -> Chips;
    /// Largest total the current seat may put in with a bet or raise.
    fn max_raise(&self) -> Chips;
    fn pot(&self) -> Chips;
    fn board(&self) -> Vec<Card>;

    fn seats(&self) -> usize {
        self.config().seats
    }
    fn stakes(&self) -> Stakes {
        self.config().stakes
    }
    fn limit(&self) -> Limit {
        self.config().limit
    }
    fn game(&self) -> Game {
        self.config().game
    }
}

/// Builds a fresh engine for every new table.
pub trait Dealer: Send + Sync {
    fn table(&self, config: Config) -> Box<dyn Rules>;
}
