/// Suits never decide a showdown here; they only make a card printable.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl From<u8> for Suit {
    fn from(n: u8) -> Self {
        [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade][n as usize % 4]
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let glyph = match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        };
        write!(f, "{}", glyph)
    }
}
