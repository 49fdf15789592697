use std::time::Duration;

/// How long a table waits on players.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Bound on a single decision before the seat folds or checks.
    pub turn: Duration,
    /// Pause between hands.
    pub cooldown: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            turn: Duration::from_secs(crate::TURN_TIMEOUT),
            cooldown: Duration::from_secs(crate::HAND_COOLDOWN),
        }
    }
}
