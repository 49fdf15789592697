use super::*;
use crate::ledger::Keeper;
use crate::transport::Notifier;
use std::time::Duration;

/// Orderly process exit.
///
/// Drains every table through the casino, gives in-flight settlement a
/// moment to land, flushes queued notifications, then writes the final
/// ledger snapshot.
pub async fn shutdown(door: &Door, notifier: &Notifier, keeper: Keeper, grace: Duration) {
    log::info!("[shutdown] draining tables");
    door.shutdown().await;
    tokio::time::sleep(grace).await;
    notifier.flush().await;
    keeper.stop().await;
    log::info!("[shutdown] complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChannelId;
    use crate::ledger::Account;
    use crate::testing::*;

    #[tokio::test(start_paused = true)]
    async fn ledger_is_saved_after_tables_drain() {
        let fx = Fixture::new();
        let casino = fx.casino();
        let door = casino.door();
        let path = fx.ledger.path().to_path_buf();
        let keeper = Keeper::spawn(fx.ledger.clone(), Duration::from_secs(3600));
        let running = tokio::spawn(casino.run());
        door.send(Event::CreateSession {
            channel: ChannelId::from("t"),
            patron: patron("a"),
            buy_in: 100,
            small: 1,
            big: 2,
        });
        door.send(Event::AddPlayer {
            channel: ChannelId::from("t"),
            patron: patron("b"),
            buy_in: 50,
        });
        door.send(Event::StartSession {
            channel: ChannelId::from("t"),
            player: patron("a").id,
        });
        shutdown(&door, &fx.notifier, keeper, Duration::from_millis(crate::SHUTDOWN_GRACE)).await;
        assert!(running.await.is_ok());
        let saved: Vec<Account> = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.iter().map(|a| a.balance).sum::<crate::Chips>(), 200);
        let texts = fx.said(&ChannelId::from("t"));
        assert!(texts.iter().any(|t| t.ends_with("Bot is shutting down")));
        assert_eq!(texts.last().map(String::as_str), Some("Destroyed table baibai"));
    }
}
