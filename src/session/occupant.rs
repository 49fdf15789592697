use super::*;
use crate::ChannelId;
use crate::PlayerId;
use crate::rules::Identity;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// A patron holding a seat. The engine sees it only as an [`Identity`].
#[derive(Debug)]
pub struct Occupant {
    patron: Patron,
    leaving: AtomicBool,
}

impl Occupant {
    pub fn new(patron: Patron) -> Self {
        Self {
            patron,
            leaving: AtomicBool::new(false),
        }
    }
    pub fn patron(&self) -> &Patron {
        &self.patron
    }
    pub fn private(&self) -> &ChannelId {
        &self.patron.private
    }
    /// Asked to leave once they are out of the current hand.
    pub fn is_leaving(&self) -> bool {
        self.leaving.load(Ordering::Relaxed)
    }
    pub fn leave_after_round(&self) {
        self.leaving.store(true, Ordering::Relaxed);
    }
}

impl Identity for Occupant {
    fn id(&self) -> &PlayerId {
        &self.patron.id
    }
    fn name(&self) -> &str {
        &self.patron.name
    }
}
