use serde::{Deserialize, Serialize};

use fairshare_core::ParticipantId;

/// A person sharing expenses in the ledger.
///
/// Names are display labels only: mutable, no uniqueness constraint. Identity
/// lives in the id, which is assigned at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
        }
    }
}
