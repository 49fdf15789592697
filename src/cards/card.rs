use super::Rank;
use super::Suit;
use std::fmt::Display;
use std::fmt::Formatter;

/// One of 52 cards, indexed 0..52 rank-major so `index / 4` is the rank.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.rank) * 4 + u8::from(c.suit)
    }
}
impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_rank_major() {
        let card = Card::from((Rank::Ten, Suit::Spade));
        assert_eq!(u8::from(card), 35);
        assert_eq!(Card::from(35), card);
        assert_eq!(Card::from(51).rank(), Rank::Ace);
    }

    #[test]
    fn prints_for_chat() {
        assert_eq!(Card::from((Rank::Ace, Suit::Heart)).to_string(), "A♥");
    }
}
