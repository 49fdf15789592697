//! Seam to the game-rules engine.
//!
//! Sessions drive a [`Rules`] implementation one step at a time and feed it
//! the decisions they collect from players. [`HighCard`] is the engine the
//! binary ships with.
mod action;
mod advance;
mod config;
mod error;
mod highcard;
mod identity;
mod rules;
mod seated;

pub use action::*;
pub use advance::*;
pub use config::*;
pub use error::*;
pub use highcard::*;
pub use identity::*;
pub use rules::*;
pub use seated::*;
