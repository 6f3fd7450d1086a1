//! Settlement calculator: who owes whom so that spending splits evenly.
//!
//! Pure derivation over a ledger. Nothing here mutates or persists; the
//! settlement is recomputed from the current state on every call.

pub mod calculator;

pub use calculator::{BALANCE_EPSILON, ParticipantBalance, Settlement, settle, total_spent};
