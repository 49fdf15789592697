//! Chat-driven multi-table poker rooms sharing one wallet ledger.
//!
//! ## Architecture
//!
//! - [`casino`]: the single serialized event processor owning every live session
//! - [`session`]: one table per channel, running its own round loop
//! - [`ledger`]: player balances, escrowed on seat and settled on every exit
//! - [`rules`]: the game-rules engine seam and the built-in [`rules::HighCard`] engine
//! - [`transport`]: outbound notifications with bounded retry
//! - [`commands`]: translation of inbound chat lines into casino events
pub mod cards;
pub mod casino;
pub mod commands;
pub mod ledger;
pub mod rules;
pub mod session;
pub mod transport;

mod error;
pub use error::*;

#[cfg(test)]
mod testing;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Wallet balances, buy-ins, stacks and bets. Never negative.
pub type Chips = u64;
/// Seat index around a table.
pub type Position = usize;
/// Identifier handed out by the casino to each session it opens.
pub type SessionId = u64;
/// Player identity as issued by the chat platform.
pub type PlayerId = ID<ledger::Account>;
/// Channel identity as issued by the chat platform.
pub type ChannelId = ID<Channel>;

/// Marker for channel identities.
#[derive(Debug)]
pub struct Channel;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Opaque platform identifier with compile-time separation between
/// players and channels.
pub struct ID<T> {
    inner: String,
    marker: PhantomData<fn() -> T>,
}

impl<T> ID<T> {
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl<T> From<&str> for ID<T> {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}
impl<T> From<String> for ID<T> {
    fn from(inner: String) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        Self::from(self.inner.clone())
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// WALLET
// ============================================================================
/// Balance granted to a player the first time they are referenced.
pub const STARTING_BALANCE: Chips = 100;
/// Top-up granted by `freemoney` to players below this balance.
pub const FREE_MONEY: Chips = 50;
/// Snapshot file for the ledger.
pub const LEDGER_PATH: &str = "players.json";
/// Interval between periodic ledger snapshots (seconds).
pub const SAVE_INTERVAL: u64 = 60;

// ============================================================================
// TABLES
// ============================================================================
/// Seats at a freshly created table.
pub const DEFAULT_SEATS: usize = 10;
/// Floor for the small stake requested at creation.
pub const MIN_SMALL_STAKE: Chips = 1;
/// Stake used when the requested big stake is below one.
pub const MIN_BIG_STAKE: Chips = 2;
/// Bound on a single turn before the seat is folded or checked (seconds).
pub const TURN_TIMEOUT: u64 = 180;
/// Pause after a hand so results can be read (seconds).
pub const HAND_COOLDOWN: u64 = 5;

// ============================================================================
// PROCESS
// ============================================================================
/// Retries granted to a notification failing with a transient error.
pub const SEND_RETRIES: usize = 5;
/// Wait between the last session draining and the final ledger save (millis).
pub const SHUTDOWN_GRACE: u64 = 1000;
/// Prefix marking a chat line as a command.
pub const PREFIX: &str = "!";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO (or DEBUG
/// when verbose) to terminal.
#[cfg(feature = "server")]
pub fn log(verbose: bool) {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        },
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ids_compare_by_value() {
        let a = PlayerId::from("42");
        let b = PlayerId::from(String::from("42"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "42");
    }
    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ChannelId::from("general");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"general\"");
        let back: ChannelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
