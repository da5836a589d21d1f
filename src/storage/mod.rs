pub mod sqlite;

pub use sqlite::SqliteStore;

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};

use crate::ledger::LedgerState;

/// Persistence backend for the ledger, working in whole-state snapshots.
pub trait LedgerStore: Send {
    /// Last saved snapshot, `None` when nothing has ever been saved.
    fn load(&self) -> Result<Option<LedgerState>>;

    /// Replaces the saved snapshot atomically.
    fn save(&self, state: &LedgerState) -> Result<()>;
}

/// In-memory store. Clones share the same snapshot, which lets tests
/// reopen a ledger over state saved earlier.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<Mutex<Option<LedgerState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        let snapshot = self
            .snapshot
            .lock()
            .map_err(|_| anyhow!("snapshot lock poisoned"))?;
        Ok(snapshot.clone())
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|_| anyhow!("snapshot lock poisoned"))?;
        *snapshot = Some(state.clone());
        Ok(())
    }
}
