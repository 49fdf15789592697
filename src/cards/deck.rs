use super::card::Card;
use rand::Rng;
use rand::seq::SliceRandom;

/// A shuffled deck dealt from the top. Shuffling takes the caller's rng so
/// tables can be replayed from a seed.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Deck {
    pub fn shuffled<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut cards = (0..52u8).map(Card::from).collect::<Vec<_>>();
        cards.shuffle(rng);
        Self(cards)
    }
    /// remove the top card from the deck
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
    /// remove n cards from the deck
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    #[test]
    fn deals_every_card_once() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::shuffled(rng);
        let cards = deck.deal(60);
        assert_eq!(cards.len(), 52);
        assert_eq!(cards.iter().copied().collect::<HashSet<_>>().len(), 52);
        assert!(deck.draw().is_none());
    }

    #[test]
    fn seeded_shuffles_repeat() {
        let a = Deck::shuffled(&mut SmallRng::seed_from_u64(1)).deal(5);
        let b = Deck::shuffled(&mut SmallRng::seed_from_u64(1)).deal(5);
        assert_eq!(a, b);
    }
}
