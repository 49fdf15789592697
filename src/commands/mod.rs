//! Inbound side of the chat platform: chat lines become casino events.
mod command;
mod dispatcher;
mod message;

pub use command::*;
pub use dispatcher::*;
pub use message::*;
