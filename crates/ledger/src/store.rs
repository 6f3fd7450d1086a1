use std::collections::HashSet;

use fairshare_core::{DomainError, DomainResult, ParticipantId};

use crate::expense::Expense;
use crate::participant::Participant;
use crate::snapshot::LedgerSnapshot;

/// Minimum number of participants the ledger must retain at all times.
pub const MIN_PARTICIPANTS: usize = 2;

/// Authoritative store of participants and expenses.
///
/// All mutations are all-or-nothing: every check runs before any state
/// changes, so a rejected operation leaves the ledger exactly as it was.
/// The store never performs IO; persistence and notification are collaborator
/// responsibilities orchestrated above it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// Insertion order.
    participants: Vec<Participant>,
    /// Most-recent-first; new expenses are prepended.
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Default ledger used when no saved data exists: two participants with
    /// placeholder names and no expenses.
    pub fn seeded() -> Self {
        Self {
            participants: vec![Participant::new("Person 1"), Participant::new("Person 2")],
            expenses: Vec::new(),
        }
    }

    /// Rebuild a ledger from a persisted snapshot.
    ///
    /// Rejects structurally invalid data: fewer than [`MIN_PARTICIPANTS`]
    /// participants, duplicate ids, or expenses owned by a missing
    /// participant.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> DomainResult<Self> {
        let LedgerSnapshot {
            participants,
            expenses,
        } = snapshot;

        if participants.len() < MIN_PARTICIPANTS {
            return Err(DomainError::invariant(format!(
                "snapshot has {} participants, at least {} required",
                participants.len(),
                MIN_PARTICIPANTS
            )));
        }

        let mut participant_ids = HashSet::with_capacity(participants.len());
        for participant in &participants {
            if !participant_ids.insert(participant.id) {
                return Err(DomainError::invariant(format!(
                    "duplicate participant id {}",
                    participant.id
                )));
            }
        }

        let mut expense_ids = HashSet::with_capacity(expenses.len());
        for expense in &expenses {
            if !expense_ids.insert(expense.id) {
                return Err(DomainError::invariant(format!(
                    "duplicate expense id {}",
                    expense.id
                )));
            }
            if !participant_ids.contains(&expense.participant_id) {
                return Err(DomainError::invariant(format!(
                    "expense {} references missing participant {}",
                    expense.id, expense.participant_id
                )));
            }
        }

        Ok(Self {
            participants,
            expenses,
        })
    }

    /// Snapshot the current state for persistence.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            participants: self.participants.clone(),
            expenses: self.expenses.clone(),
        }
    }

    /// Add a participant with a generated placeholder name
    /// ("Person {count + 1}").
    ///
    /// Cannot fail. Re-adding after removals can repeat a display name; names
    /// carry no uniqueness constraint.
    pub fn add_participant(&mut self) -> Participant {
        let name = format!("Person {}", self.participants.len() + 1);
        let participant = Participant::new(name);
        tracing::debug!(
            participant_id = %participant.id,
            name = %participant.name,
            "participant added"
        );
        self.participants.push(participant.clone());
        participant
    }

    /// Rename a participant.
    ///
    /// Any string is accepted, including empty: display names carry no format
    /// constraint.
    pub fn rename_participant(
        &mut self,
        id: ParticipantId,
        new_name: impl Into<String>,
    ) -> DomainResult<()> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::not_found(format!("participant {}", id)))?;
        participant.name = new_name.into();
        tracing::debug!(participant_id = %id, "participant renamed");
        Ok(())
    }

    /// Remove a participant and every expense it owns, as one atomic step.
    ///
    /// `NotFound` if the id is unknown; `InvariantViolation` if removal would
    /// drop the participant count below [`MIN_PARTICIPANTS`]. On any error
    /// nothing is removed.
    pub fn remove_participant(&mut self, id: ParticipantId) -> DomainResult<()> {
        if !self.participants.iter().any(|p| p.id == id) {
            return Err(DomainError::not_found(format!("participant {}", id)));
        }
        if self.participants.len() <= MIN_PARTICIPANTS {
            return Err(DomainError::invariant(format!(
                "cannot remove participant: at least {} required",
                MIN_PARTICIPANTS
            )));
        }

        self.participants.retain(|p| p.id != id);
        let before = self.expenses.len();
        self.expenses.retain(|e| e.participant_id != id);
        tracing::debug!(
            participant_id = %id,
            cascaded_expenses = before - self.expenses.len(),
            "participant removed"
        );
        Ok(())
    }

    /// Record a new expense for a participant.
    ///
    /// `Validation` if the amount is not a positive finite number, the
    /// description is blank, or the participant id is unknown. On success the
    /// expense is prepended ([`expenses`](Self::expenses) is
    /// most-recent-first) and returned.
    pub fn add_expense(
        &mut self,
        participant_id: ParticipantId,
        amount: f64,
        description: impl Into<String>,
    ) -> DomainResult<Expense> {
        let description = description.into();

        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::validation("amount must be a positive number"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        if !self.participants.iter().any(|p| p.id == participant_id) {
            return Err(DomainError::validation(format!(
                "unknown participant {}",
                participant_id
            )));
        }

        let expense = Expense::new(participant_id, amount, description);
        tracing::debug!(
            expense_id = %expense.id,
            participant_id = %participant_id,
            amount,
            "expense added"
        );
        self.expenses.insert(0, expense.clone());
        Ok(expense)
    }

    /// All expenses, most recent first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Leading slice of [`expenses`](Self::expenses) for recent-activity
    /// views; shorter than `limit` when fewer expenses exist.
    pub fn recent_expenses(&self, limit: usize) -> &[Expense] {
        &self.expenses[..self.expenses.len().min(limit)]
    }

    /// All participants, insertion order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }
}
