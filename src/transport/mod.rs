//! Outbound side of the chat platform.
//!
//! Everything the room says goes through a [`Notifier`], which queues text
//! for a background courier so sessions never wait on delivery.
mod notifier;
mod transport;

#[cfg(feature = "server")]
mod console;

#[cfg(feature = "server")]
pub use console::*;
pub use notifier::*;
pub use transport::*;
