use serde::{Deserialize, Serialize};

use crate::expense::Expense;
use crate::participant::Participant;

/// The serializable `{participants, expenses}` pair handed to persistence.
///
/// Field order within `expenses` is load-bearing: most-recent-first, exactly
/// as the store keeps it in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
}
