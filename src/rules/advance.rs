use super::*;
use crate::Chips;
use crate::Position;
use crate::cards::Card;
use std::sync::Arc;

/// Result of one engine step.
///
/// - `results` is set when a hand just completed
/// - `done` is set when no further hand can be dealt
/// - `error` is informational; the step result stands on its own
#[derive(Debug, Default)]
pub struct Advance {
    pub results: Option<Vec<Outcome>>,
    pub done: bool,
    pub error: Option<RulesError>,
}

impl Advance {
    pub fn done() -> Self {
        Self {
            done: true,
            ..Self::default()
        }
    }
    pub fn results(results: Vec<Outcome>) -> Self {
        Self {
            results: Some(results),
            ..Self::default()
        }
    }
}

/// One seat's share of a completed hand.
#[derive(Clone)]
pub struct Outcome {
    pub seat: Position,
    pub player: Arc<dyn Identity>,
    pub won: Chips,
    /// Hole cards when the hand went to showdown, empty otherwise.
    pub shown: Vec<Card>,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .shown
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        match (self.won, cards.is_empty()) {
            (0, true) => write!(f, "{}: lost", self.player.name()),
            (0, false) => write!(f, "{}: lost with [{}]", self.player.name(), cards),
            (n, true) => write!(f, "{}: won {}", self.player.name(), n),
            (n, false) => write!(f, "{}: won {} with [{}]", self.player.name(), n, cards),
        }
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Outcome")
            .field("seat", &self.seat)
            .field("player", self.player.id())
            .field("won", &self.won)
            .finish()
    }
}
