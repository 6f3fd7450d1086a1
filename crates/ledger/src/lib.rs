//! Ledger domain module: participants, expenses, and the authoritative store.
//!
//! Business rules live here as deterministic, synchronous logic (no IO, no
//! storage). Collaborators mutate the store through its declared operations
//! and persist snapshots at the session layer.

pub mod expense;
pub mod participant;
pub mod snapshot;
pub mod store;

pub use expense::Expense;
pub use participant::Participant;
pub use snapshot::LedgerSnapshot;
pub use store::{Ledger, MIN_PARTICIPANTS};
