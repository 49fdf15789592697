//! One table per channel.
//!
//! A [`Session`] wraps a game-rules engine behind its own lock. Administrative
//! requests come in from the casino; once started, the session drives the
//! engine from its own task and waits on its mailbox whenever a seat owes a
//! decision.
mod house;
mod occupant;
mod patron;
mod play;
mod round;
mod session;
mod timing;

pub use house::*;
pub use occupant::*;
pub use patron::*;
pub use play::*;
pub use session::*;
pub use timing::*;
