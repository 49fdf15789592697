use super::*;
use crate::Chips;
use crate::PlayerId;
use crate::Rejection;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Durable map from player to wallet.
///
/// Callers lock a single [`Account`] to read-modify-write it; there is no
/// global money lock. A session that holds its own lock may take an account
/// lock, never the other way around.
pub struct Ledger {
    path: PathBuf,
    accounts: RwLock<HashMap<PlayerId, Arc<Mutex<Account>>>>,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            accounts: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Single rotating backup slot, e.g. `players.json.1`.
    pub fn backup(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".1");
        PathBuf::from(name)
    }

    /// Restore the last snapshot. A missing or corrupt file leaves the
    /// ledger empty.
    pub async fn load(&self) {
        match self.read().await {
            Ok(accounts) => {
                log::info!(
                    "[ledger] loaded {} accounts from {}",
                    accounts.len(),
                    self.path.display()
                );
                let mut map = self.accounts.write().await;
                map.clear();
                map.extend(
                    accounts
                        .into_iter()
                        .map(|a| (a.id.clone(), Arc::new(Mutex::new(a)))),
                );
            }
            Err(e) => log::warn!(
                "[ledger] starting empty, could not load {}: {}",
                self.path.display(),
                e
            ),
        }
    }

    async fn read(&self) -> anyhow::Result<Vec<Account>> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write a full snapshot, moving the previous one to the backup slot first.
    pub async fn save(&self) -> anyhow::Result<()> {
        let accounts = self.snapshot().await;
        let json = serde_json::to_vec_pretty(&accounts)?;
        if tokio::fs::try_exists(&self.path).await? {
            tokio::fs::rename(&self.path, self.backup()).await?;
        }
        tokio::fs::write(&self.path, json).await?;
        log::debug!("[ledger] saved {} accounts", accounts.len());
        Ok(())
    }

    /// Existing account, or a fresh one with the starting balance.
    pub async fn account(&self, id: &PlayerId, name: &str) -> Arc<Mutex<Account>> {
        if let Some(account) = self.accounts.read().await.get(id) {
            return account.clone();
        }
        self.accounts
            .write()
            .await
            .entry(id.clone())
            .or_insert_with(|| {
                log::info!("[ledger] opened account for {} ({})", name, id);
                Arc::new(Mutex::new(Account::new(id.clone(), name)))
            })
            .clone()
    }

    pub async fn debit(&self, id: &PlayerId, name: &str, chips: Chips) -> Result<(), Rejection> {
        self.account(id, name).await.lock().await.debit(chips)
    }

    pub async fn credit(&self, id: &PlayerId, name: &str, chips: Chips) {
        self.account(id, name).await.lock().await.credit(chips)
    }

    /// Balance without creating the account.
    pub async fn balance(&self, id: &PlayerId) -> Option<Chips> {
        let account = self.accounts.read().await.get(id).cloned()?;
        let balance = account.lock().await.balance;
        Some(balance)
    }

    /// Copy of every account, ordered by id.
    pub async fn snapshot(&self) -> Vec<Account> {
        let handles = self
            .accounts
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        let mut accounts = Vec::with_capacity(handles.len());
        for handle in handles {
            accounts.push(handle.lock().await.clone());
        }
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    /// Sum of every balance.
    pub async fn total(&self) -> Chips {
        self.snapshot().await.iter().map(|a| a.balance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accounts_open_with_the_starting_balance() {
        let ledger = Ledger::new("unused.json");
        let id = PlayerId::from("1");
        assert_eq!(ledger.balance(&id).await, None);
        ledger.account(&id, "ann").await;
        assert_eq!(ledger.balance(&id).await, Some(crate::STARTING_BALANCE));
        assert_eq!(
            ledger.debit(&id, "ann", 500).await,
            Err(Rejection::InsufficientFunds)
        );
        ledger.debit(&id, "ann", 40).await.unwrap();
        ledger.credit(&id, "ann", 15).await;
        assert_eq!(ledger.balance(&id).await, Some(75));
    }

    #[tokio::test]
    async fn save_rotates_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        let ledger = Ledger::new(&path);
        let id = PlayerId::from("1");
        ledger.account(&id, "ann").await;
        ledger.save().await.unwrap();
        assert!(!ledger.backup().exists());
        ledger.credit(&id, "ann", 20).await;
        ledger.save().await.unwrap();
        assert!(ledger.backup().exists());
        assert_eq!(ledger.backup(), dir.path().join("players.json.1"));

        let old: Vec<Account> =
            serde_json::from_slice(&std::fs::read(ledger.backup()).unwrap()).unwrap();
        assert_eq!(old[0].balance, 100);

        let restored = Ledger::new(&path);
        restored.load().await;
        assert_eq!(restored.balance(&id).await, Some(120));
    }

    #[tokio::test]
    async fn corrupt_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let ledger = Ledger::new(&path);
        ledger.load().await;
        assert!(ledger.snapshot().await.is_empty());

        let missing = Ledger::new(dir.path().join("absent.json"));
        missing.load().await;
        assert!(missing.snapshot().await.is_empty());
    }
}
