use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fairshare_core::{ExpenseId, ParticipantId};

/// A single monetary entry attributed to exactly one participant.
///
/// Immutable once recorded; removed only by cascade when its owner is
/// removed. `created_at` is for ordering/display and round-trips through
/// persistence as RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub participant_id: ParticipantId,
    /// Positive finite amount in a single currency-agnostic unit.
    pub amount: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(participant_id: ParticipantId, amount: f64, description: impl Into<String>) -> Self {
        Self {
            id: ExpenseId::new(),
            participant_id,
            amount,
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}
