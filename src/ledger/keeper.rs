use super::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Background task saving the ledger on a fixed interval.
/// [`Keeper::stop`] performs the final save before returning.
pub struct Keeper {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Keeper {
    pub fn spawn(ledger: Arc<Ledger>, every: Duration) -> Self {
        let (stop, mut halt) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = ledger.save().await {
                            log::error!("[ledger] periodic save failed: {}", e);
                        }
                    }
                    _ = &mut halt => break,
                }
            }
            match ledger.save().await {
                Ok(()) => log::info!("[ledger] final snapshot written"),
                Err(e) => log::error!("[ledger] final save failed: {}", e),
            }
        });
        Self { stop, task }
    }

    /// Stop the timer and wait for the final save.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            log::error!("[ledger] keeper task failed: {}", e);
        }
    }
}
