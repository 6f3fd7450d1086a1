use std::path::Path;

use thiserror::Error;

use fairshare_core::{DomainError, ParticipantId};
use fairshare_ledger::{Expense, Ledger, Participant};
use fairshare_notify::{Notification, Notifier};
use fairshare_persistence::{
    KeyValueStore, PersistenceError, SnapshotRepository, export_expenses_json,
    export_expenses_to_file,
};
use fairshare_settlement::{Settlement, settle};

/// Failure of a session operation: either the domain rejected it (state
/// unchanged) or the infrastructure failed underneath it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Persistence(#[from] PersistenceError),
}

/// Collaborator-facing orchestration over one loaded ledger.
///
/// Every mutator runs the ledger operation, persists the snapshot on
/// success, and reports the outcome through the notifier; rejected
/// operations are reported too and leave both the in-memory and the
/// persisted state untouched. Derivations (`settlement`) are explicit calls.
pub struct Session<S, N> {
    ledger: Ledger,
    repository: SnapshotRepository<S>,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> Session<S, N> {
    /// Load the saved ledger (or seed the default one) and open a session on
    /// it.
    pub fn open(store: S, notifier: N) -> Result<Self, PersistenceError> {
        let repository = SnapshotRepository::new(store);
        let ledger = repository.load_or_seed()?;
        Ok(Self {
            ledger,
            repository,
            notifier,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Add an auto-named participant.
    pub fn add_participant(&mut self) -> Result<Participant, SessionError> {
        let participant = self.ledger.add_participant();
        self.persist()?;
        self.notifier.notify(Notification::success(
            "Participant added",
            format!("{} joined the ledger", participant.name),
        ));
        Ok(participant)
    }

    /// Rename a participant.
    pub fn rename_participant(
        &mut self,
        id: ParticipantId,
        new_name: impl Into<String>,
    ) -> Result<(), SessionError> {
        let new_name = new_name.into();
        match self.ledger.rename_participant(id, new_name.as_str()) {
            Ok(()) => {
                self.persist()?;
                self.notifier.notify(Notification::success(
                    "Participant renamed",
                    format!("renamed to \"{}\"", new_name),
                ));
                Ok(())
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    "Cannot rename participant",
                    err.to_string(),
                ));
                Err(err.into())
            }
        }
    }

    /// Remove a participant and their expenses.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<(), SessionError> {
        let name = self.ledger.participant(id).map(|p| p.name.clone());
        match self.ledger.remove_participant(id) {
            Ok(()) => {
                self.persist()?;
                self.notifier.notify(Notification::success(
                    "Participant removed",
                    format!(
                        "{} and their expenses have been removed",
                        name.unwrap_or_else(|| id.to_string())
                    ),
                ));
                Ok(())
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    "Cannot remove participant",
                    err.to_string(),
                ));
                Err(err.into())
            }
        }
    }

    /// Record an expense.
    pub fn add_expense(
        &mut self,
        participant_id: ParticipantId,
        amount: f64,
        description: impl Into<String>,
    ) -> Result<Expense, SessionError> {
        match self.ledger.add_expense(participant_id, amount, description) {
            Ok(expense) => {
                self.persist()?;
                self.notifier.notify(Notification::success(
                    "Expense added",
                    format!("{:.2} for {}", expense.amount, expense.description),
                ));
                Ok(expense)
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::error("Invalid expense", err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Derive the settlement for the current state.
    pub fn settlement(&self) -> Result<Settlement, SessionError> {
        Ok(settle(&self.ledger)?)
    }

    /// Pretty-printed JSON dump of all expenses.
    pub fn export_json(&self) -> Result<String, SessionError> {
        let json = export_expenses_json(&self.ledger)?;
        self.notifier.notify(Notification::success(
            "Data exported",
            format!("{} expenses exported", self.ledger.expense_count()),
        ));
        Ok(json)
    }

    /// Write the expense dump to a file.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        export_expenses_to_file(&self.ledger, &path)?;
        self.notifier.notify(Notification::success(
            "Data exported",
            format!("expenses written to {}", path.as_ref().display()),
        ));
        Ok(())
    }

    /// Clear saved data; the session continues on the default ledger.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.repository.clear()?;
        self.ledger = Ledger::seeded();
        self.notifier.notify(Notification::success(
            "Data reset",
            "saved data cleared, default ledger restored",
        ));
        Ok(())
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        self.repository.save(&self.ledger.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fairshare_notify::{NotificationKind, RecordingNotifier};
    use fairshare_persistence::InMemoryKeyValueStore;

    fn open_session() -> (
        Session<Arc<InMemoryKeyValueStore>, Arc<RecordingNotifier>>,
        Arc<InMemoryKeyValueStore>,
        Arc<RecordingNotifier>,
    ) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = Session::open(store.clone(), notifier.clone()).unwrap();
        (session, store, notifier)
    }

    #[test]
    fn successful_mutation_persists_and_notifies() {
        let (mut session, store, notifier) = open_session();
        let id = session.ledger().participants()[0].id;

        session.add_expense(id, 12.0, "pizza").unwrap();

        // Persisted under the fixed key.
        let saved = store.get("expenses").unwrap().unwrap();
        assert!(saved.contains("pizza"));

        let all = notifier.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].kind, NotificationKind::Success);
        assert_eq!(all[0].title, "Expense added");
    }

    #[test]
    fn rejected_mutation_notifies_and_persists_nothing() {
        let (mut session, store, notifier) = open_session();
        let id = session.ledger().participants()[0].id;

        assert!(session.add_expense(id, -1.0, "bad").is_err());

        assert_eq!(store.get("expenses").unwrap(), None);
        assert_eq!(session.ledger().expense_count(), 0);

        let all = notifier.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].kind, NotificationKind::Error);
        assert_eq!(all[0].title, "Invalid expense");
    }

    #[test]
    fn floor_violation_surfaces_through_the_notifier() {
        let (mut session, _store, notifier) = open_session();
        let id = session.ledger().participants()[0].id;

        assert!(session.remove_participant(id).is_err());

        let all = notifier.all();
        assert_eq!(all[0].kind, NotificationKind::Error);
        assert_eq!(all[0].title, "Cannot remove participant");
        assert_eq!(session.ledger().participant_count(), 2);
    }

    #[test]
    fn reset_clears_saved_data_and_reseeds() {
        let (mut session, store, _notifier) = open_session();
        session.add_participant().unwrap();
        assert!(store.get("people").unwrap().is_some());

        session.reset().unwrap();

        assert_eq!(store.get("people").unwrap(), None);
        assert_eq!(store.get("expenses").unwrap(), None);
        assert_eq!(session.ledger().participant_count(), 2);
    }

    #[test]
    fn export_json_reports_the_expense_count() {
        let (mut session, _store, notifier) = open_session();
        let id = session.ledger().participants()[0].id;
        session.add_expense(id, 5.0, "coffee").unwrap();

        let json = session.export_json().unwrap();
        assert!(json.contains("coffee"));

        let last = notifier.all().pop().unwrap();
        assert_eq!(last.title, "Data exported");
        assert_eq!(last.message, "1 expenses exported");
    }
}
