use std::path::Path;
use std::sync::Arc;

use fairshare_cli::{Session, SessionError};
use fairshare_core::{DomainError, ParticipantId};
use fairshare_ledger::Ledger;
use fairshare_notify::{NotificationKind, RecordingNotifier};
use fairshare_persistence::FileKeyValueStore;
use tempfile::TempDir;

type FileSession = Session<FileKeyValueStore, Arc<RecordingNotifier>>;

fn open_session(dir: &Path) -> (FileSession, Arc<RecordingNotifier>) {
    let store = FileKeyValueStore::open(dir).expect("failed to open store");
    let notifier = Arc::new(RecordingNotifier::new());
    let session = Session::open(store, Arc::clone(&notifier)).expect("failed to open session");
    (session, notifier)
}

fn id_of(ledger: &Ledger, name: &str) -> ParticipantId {
    ledger
        .participants()
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
        .expect("participant not found")
}

#[test]
fn fresh_directory_seeds_the_default_ledger() {
    let dir = TempDir::new().unwrap();
    let (session, _) = open_session(dir.path());

    let ledger = session.ledger();
    assert_eq!(ledger.participant_count(), 2);
    assert_eq!(ledger.expense_count(), 0);

    let names: Vec<&str> = ledger
        .participants()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Person 1", "Person 2"]);
}

#[test]
fn full_lifecycle_survives_reopen() {
    let dir = TempDir::new().unwrap();

    // First session: grow the group and record spending.
    {
        let (mut session, _) = open_session(dir.path());
        session.add_participant().unwrap();

        let ids: Vec<ParticipantId> = session
            .ledger()
            .participants()
            .iter()
            .map(|p| p.id)
            .collect();
        for (id, name) in ids.iter().zip(["Alice", "Bob", "Carol"]) {
            session.rename_participant(*id, name).unwrap();
        }

        let alice = id_of(session.ledger(), "Alice");
        let bob = id_of(session.ledger(), "Bob");
        session.add_expense(bob, 30.0, "snacks").unwrap();
        session.add_expense(alice, 90.0, "fuel").unwrap();
    }

    // Second session over the same directory sees the saved state.
    let (session, _) = open_session(dir.path());
    let ledger = session.ledger();
    assert_eq!(ledger.participant_count(), 3);
    assert_eq!(ledger.expense_count(), 2);
    assert_eq!(ledger.expenses()[0].description, "fuel");

    let settlement = session.settlement().unwrap();
    assert_eq!(settlement.grand_total, 120.0);
    assert_eq!(settlement.fair_share, 40.0);

    let alice = id_of(ledger, "Alice");
    let alice_balance = settlement
        .balances
        .iter()
        .find(|b| b.participant_id == alice)
        .unwrap();
    assert_eq!(alice_balance.balance, 50.0);
    assert!(!alice_balance.owes);

    let sum: f64 = settlement.balances.iter().map(|b| b.balance).sum();
    assert!(sum.abs() <= 1e-9);
}

#[test]
fn removal_cascades_and_the_floor_is_enforced() {
    let dir = TempDir::new().unwrap();
    let (mut session, notifier) = open_session(dir.path());
    session.add_participant().unwrap();

    let third = session.ledger().participants()[2].id;
    session.add_expense(third, 42.0, "parking").unwrap();

    // Removing a participant drops their expenses too.
    session.remove_participant(third).unwrap();
    assert_eq!(session.ledger().participant_count(), 2);
    assert_eq!(session.ledger().expense_count(), 0);

    // Two participants is the floor; the next removal is rejected.
    let second = session.ledger().participants()[1].id;
    let err = session.remove_participant(second).unwrap_err();
    match err {
        SessionError::Domain(DomainError::InvariantViolation(_)) => {}
        other => panic!("expected invariant violation, got {:?}", other),
    }

    let notes = notifier.all();
    let last = notes.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.title, "Cannot remove participant");

    // The rejected removal must not have touched saved state.
    let (reopened, _) = open_session(dir.path());
    assert_eq!(reopened.ledger().participant_count(), 2);
}

#[test]
fn reset_discards_saved_data_across_sessions() {
    let dir = TempDir::new().unwrap();

    {
        let (mut session, _) = open_session(dir.path());
        let first = session.ledger().participants()[0].id;
        session.add_expense(first, 12.5, "coffee").unwrap();
        session.reset().unwrap();
    }

    let (session, _) = open_session(dir.path());
    assert_eq!(session.ledger().participant_count(), 2);
    assert_eq!(session.ledger().expense_count(), 0);
}

#[test]
fn export_writes_the_expense_document() {
    let dir = TempDir::new().unwrap();
    let (mut session, _) = open_session(dir.path());

    let first = session.ledger().participants()[0].id;
    session.add_expense(first, 18.0, "tickets").unwrap();

    let out = dir.path().join("export.json");
    session.export_to_file(&out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["description"], "tickets");
    assert_eq!(parsed[0]["amount"], 18.0);
}
