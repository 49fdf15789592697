//! Player wallets shared by every table.
//!
//! Balances are escrowed when a player sits down and credited back on every
//! way out of a seat. Each account sits behind its own lock, so tables can
//! settle different players concurrently.
mod account;
mod keeper;
mod ledger;

pub use account::*;
pub use keeper::*;
pub use ledger::*;
