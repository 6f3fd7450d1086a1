use fairshare_ledger::{Ledger, LedgerSnapshot};

use crate::error::PersistenceResult;
use crate::kv::KeyValueStore;

/// Key under which the participant list is stored.
pub const PEOPLE_KEY: &str = "people";
/// Key under which the expense list is stored.
pub const EXPENSES_KEY: &str = "expenses";

/// Snapshot persistence over a key/value store.
///
/// The two collections are stored as separate JSON documents under fixed
/// keys. Document order for expenses is the store's in-memory order
/// (most-recent-first) and survives the round trip, as does the textual
/// `created_at` of every expense.
pub struct SnapshotRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SnapshotRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the saved snapshot.
    ///
    /// Returns `None` when either key is absent; a half-present state cannot
    /// satisfy referential integrity, so it is treated as no saved data.
    pub fn load(&self) -> PersistenceResult<Option<LedgerSnapshot>> {
        let (Some(people), Some(expenses)) =
            (self.store.get(PEOPLE_KEY)?, self.store.get(EXPENSES_KEY)?)
        else {
            return Ok(None);
        };

        Ok(Some(LedgerSnapshot {
            participants: serde_json::from_str(&people)?,
            expenses: serde_json::from_str(&expenses)?,
        }))
    }

    /// Load and validate the saved ledger, or seed the default one when no
    /// saved data exists.
    pub fn load_or_seed(&self) -> PersistenceResult<Ledger> {
        match self.load()? {
            Some(snapshot) => Ok(Ledger::from_snapshot(snapshot)?),
            None => {
                tracing::debug!("no saved data, seeding default ledger");
                Ok(Ledger::seeded())
            }
        }
    }

    /// Persist both collections.
    pub fn save(&self, snapshot: &LedgerSnapshot) -> PersistenceResult<()> {
        self.store
            .put(PEOPLE_KEY, &serde_json::to_string(&snapshot.participants)?)?;
        self.store
            .put(EXPENSES_KEY, &serde_json::to_string(&snapshot.expenses)?)?;
        tracing::debug!(
            participants = snapshot.participants.len(),
            expenses = snapshot.expenses.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Remove both keys; the next `load_or_seed` reseeds the defaults.
    pub fn clear(&self) -> PersistenceResult<()> {
        self.store.remove(PEOPLE_KEY)?;
        self.store.remove(EXPENSES_KEY)?;
        Ok(())
    }
}
