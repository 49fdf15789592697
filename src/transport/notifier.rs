use super::*;
use crate::ChannelId;
use crate::PlayerId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

enum Note {
    Text { channel: ChannelId, text: String },
    Flush(oneshot::Sender<()>),
}

/// Cheap handle for queueing notifications.
///
/// Messages are delivered in the order they were queued by a single courier
/// task. Private channels are resolved once per player and cached.
#[derive(Clone)]
pub struct Notifier {
    queue: UnboundedSender<Note>,
    transport: Arc<dyn Transport>,
    private: Arc<RwLock<HashMap<PlayerId, ChannelId>>>,
}

impl Notifier {
    pub fn spawn(transport: Arc<dyn Transport>, retries: usize) -> Self {
        let (queue, inbox) = unbounded_channel();
        let courier = Courier {
            transport: transport.clone(),
            retries,
            inbox,
        };
        tokio::spawn(courier.run());
        Self {
            queue,
            transport,
            private: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Queue a message. Never blocks and never fails; undeliverable text is
    /// logged and dropped.
    pub fn send(&self, channel: &ChannelId, text: impl Into<String>) {
        let note = Note::Text {
            channel: channel.clone(),
            text: text.into(),
        };
        if self.queue.send(note).is_err() {
            log::warn!("[courier] gone, dropping message for {}", channel);
        }
    }

    /// Direct channel to `player`, opened on first use.
    pub async fn private(&self, player: &PlayerId) -> Result<ChannelId, DeliveryError> {
        if let Some(channel) = self.private.read().await.get(player) {
            return Ok(channel.clone());
        }
        let channel = self.transport.open_private(player).await?;
        self.private
            .write()
            .await
            .insert(player.clone(), channel.clone());
        Ok(channel)
    }

    /// Wait until everything queued before this call was attempted.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.queue.send(Note::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }
}

/// Delivers queued notes one at a time with a bounded retry budget.
struct Courier {
    transport: Arc<dyn Transport>,
    retries: usize,
    inbox: UnboundedReceiver<Note>,
}

impl Courier {
    async fn run(mut self) {
        while let Some(note) = self.inbox.recv().await {
            match note {
                Note::Text { channel, text } => self.deliver(&channel, &text).await,
                Note::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        log::debug!("[courier] queue closed");
    }

    async fn deliver(&self, channel: &ChannelId, text: &str) {
        for attempt in 0..=self.retries {
            match self.transport.send(channel, text).await {
                Ok(()) => return,
                Err(DeliveryError::Transient(e)) => {
                    log::warn!("[courier] attempt {} to {} failed: {}", attempt + 1, channel, e)
                }
                Err(DeliveryError::Rejected(e)) => {
                    log::error!("[courier] {} rejected message: {}", channel, e);
                    return;
                }
            }
        }
        log::error!(
            "[courier] dropped message for {} after {} attempts",
            channel,
            self.retries + 1
        );
    }
}
