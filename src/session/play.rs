use crate::PlayerId;
use crate::rules::Action;

/// What a player typed when it is their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Act(Action),
    /// Call, bet or raise for as much as allowed.
    AllIn,
}

impl TryFrom<&str> for Verb {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "allin" | "all-in" | "shove" => Ok(Verb::AllIn),
            other => Action::try_from(other).map(Verb::Act),
        }
    }
}

/// A decision with its raw amount, validated only once the turn resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub verb: Verb,
    pub amount: Option<String>,
}

impl Move {
    /// Parse a chat line such as `raise 20`. Lines that do not start with an
    /// action word yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let verb = Verb::try_from(words.next()?).ok()?;
        Some(Self {
            verb,
            amount: words.next().map(str::to_string),
        })
    }
}

/// Mailbox item for a running session.
#[derive(Debug, Clone)]
pub enum Play {
    Move { player: PlayerId, mv: Move },
    /// A seat was emptied by force; any turn waiting on it must re-check.
    Vacated(PlayerId),
}
