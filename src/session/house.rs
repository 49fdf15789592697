use super::*;
use crate::casino::Door;
use crate::ledger::Ledger;
use crate::transport::Notifier;
use std::sync::Arc;

/// Services every session shares with the casino.
#[derive(Clone)]
pub struct House {
    pub ledger: Arc<Ledger>,
    pub notifier: Notifier,
    /// Back into the casino, for reporting a finished table.
    pub door: Door,
    pub timing: Timing,
}
