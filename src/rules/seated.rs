use super::*;
use crate::Chips;
use crate::Position;
use crate::cards::Card;
use std::sync::Arc;

/// Read-only view of an occupied seat.
#[derive(Clone)]
pub struct Seated {
    pub seat: Position,
    pub player: Arc<dyn Identity>,
    pub chips: Chips,
    /// Folded, or sat down after the current hand was dealt.
    pub out: bool,
    pub hole: Vec<Card>,
}

impl Seated {
    pub fn id(&self) -> &crate::PlayerId {
        self.player.id()
    }
    pub fn name(&self) -> &str {
        self.player.name()
    }
}

impl std::fmt::Debug for Seated {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Seated")
            .field("seat", &self.seat)
            .field("player", self.player.id())
            .field("chips", &self.chips)
            .field("out", &self.out)
            .finish()
    }
}
