//! The single authority over which tables exist.
//!
//! Every lifecycle request arrives as an [`Event`] on one queue and is
//! handled in arrival order by the [`Casino`], so the session table itself
//! needs no lock.
mod casino;
mod door;
mod event;
mod shutdown;

pub use casino::*;
pub use door::*;
pub use event::*;
pub use shutdown::*;
