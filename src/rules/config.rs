use crate::Chips;
use crate::DEFAULT_SEATS;

/// Table configuration handed to the engine at creation and on settings changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub game: Game,
    pub limit: Limit,
    pub stakes: Stakes,
    pub seats: usize,
}

impl Config {
    pub fn new(small: Chips, big: Chips) -> Self {
        Self {
            stakes: Stakes {
                small,
                big,
                ante: 0,
            },
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: Game::HighCard,
            limit: Limit::NoLimit,
            stakes: Stakes {
                small: crate::MIN_SMALL_STAKE,
                big: crate::MIN_BIG_STAKE,
                ante: 0,
            },
            seats: DEFAULT_SEATS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stakes {
    pub small: Chips,
    pub big: Chips,
    pub ante: Chips,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    HighCard,
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Game::HighCard => write!(f, "High Card"),
        }
    }
}

/// Betting structure bounding the size of bets and raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    NoLimit,
    PotLimit,
    FixedLimit,
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Limit::NoLimit => write!(f, "No Limit"),
            Limit::PotLimit => write!(f, "Pot Limit"),
            Limit::FixedLimit => write!(f, "Fixed Limit"),
        }
    }
}

impl TryFrom<&str> for Limit {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "nolimit" | "nl" => Ok(Limit::NoLimit),
            "potlimit" | "pl" => Ok(Limit::PotLimit),
            "fixedlimit" | "fixed" | "limit" | "fl" => Ok(Limit::FixedLimit),
            _ => Err(s.to_string()),
        }
    }
}
