use crate::Chips;
use crate::PlayerId;
use crate::Rejection;
use crate::STARTING_BALANCE;
use serde::Deserialize;
use serde::Serialize;

/// One player's wallet. Field names match the snapshot format on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "ID")]
    pub id: PlayerId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Money")]
    pub balance: Chips,
}

impl Account {
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            balance: STARTING_BALANCE,
        }
    }
    /// Withdraw without ever going negative.
    pub fn debit(&mut self, chips: Chips) -> Result<(), Rejection> {
        self.balance = self
            .balance
            .checked_sub(chips)
            .ok_or(Rejection::InsufficientFunds)?;
        Ok(())
    }
    pub fn credit(&mut self, chips: Chips) {
        self.balance += chips;
    }
}
