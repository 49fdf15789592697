use super::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Sending half of the casino's event queue.
#[derive(Debug, Clone)]
pub struct Door(UnboundedSender<Event>);

impl Door {
    pub fn channel() -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        (Self(tx), rx)
    }

    pub fn send(&self, event: Event) {
        if let Err(e) = self.0.send(event) {
            log::warn!("[casino] closed, dropping {:?}", e.0);
        }
    }

    /// Ask the casino to wind down and wait until every table is settled.
    pub async fn shutdown(&self) {
        let (done, wait) = oneshot::channel();
        self.send(Event::ShutdownRequest { done });
        if wait.await.is_err() {
            log::warn!("[casino] shut down without confirming");
        }
    }
}
