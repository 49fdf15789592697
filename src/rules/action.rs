/// Decisions a seat can hand to the engine.
/// Amounts travel separately since only bets and raises carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl Action {
    /// Whether the engine needs a chip amount alongside this action.
    pub fn is_sized(&self) -> bool {
        matches!(self, Action::Bet | Action::Raise)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Bet => write!(f, "bet"),
            Action::Raise => write!(f, "raise"),
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "fold" => Ok(Action::Fold),
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "bet" => Ok(Action::Bet),
            "raise" => Ok(Action::Raise),
            _ => Err(format!("{} is not an action", s)),
        }
    }
}
