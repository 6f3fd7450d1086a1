use std::collections::HashMap;

use fairshare_core::{DomainError, DomainResult, ParticipantId};
use fairshare_ledger::Ledger;

/// Tolerance within which a balance counts as settled.
///
/// Appropriate for currency-scale magnitudes; callers comparing derived
/// balances should use this rather than exact equality.
pub const BALANCE_EPSILON: f64 = 1e-9;

/// Read model: one participant's position against the even split.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantBalance {
    pub participant_id: ParticipantId,
    pub name: String,
    /// Sum of this participant's expense amounts.
    pub total_spent: f64,
    /// `total_spent - fair_share`. Positive: overpaid, should receive.
    /// Negative: owes the group.
    pub balance: f64,
    pub owes: bool,
    /// Magnitude of the transfer that settles this participant.
    pub amount_to_settle: f64,
}

/// The derived settlement for a ledger at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub grand_total: f64,
    /// `grand_total / participant_count`.
    pub fair_share: f64,
    /// Participant insertion order.
    pub balances: Vec<ParticipantBalance>,
}

impl Settlement {
    /// Whether every balance is within [`BALANCE_EPSILON`] of zero, i.e.
    /// spending is currently split evenly.
    pub fn is_settled(&self) -> bool {
        self.balances.iter().all(|b| b.balance.abs() <= BALANCE_EPSILON)
    }
}

/// Sum of one participant's expense amounts; zero when none exist.
pub fn total_spent(ledger: &Ledger, participant_id: ParticipantId) -> f64 {
    ledger
        .expenses()
        .iter()
        .filter(|e| e.participant_id == participant_id)
        .map(|e| e.amount)
        .sum()
}

/// Derive the settlement for the current ledger state.
///
/// Pure and deterministic: the same ledger always yields the same settlement,
/// in one pass over the expenses. Fails with `InvariantViolation` on an empty
/// participant set rather than dividing by zero; the ledger's participant
/// floor makes that unreachable through normal use.
pub fn settle(ledger: &Ledger) -> DomainResult<Settlement> {
    let count = ledger.participant_count();
    if count == 0 {
        return Err(DomainError::invariant("cannot settle with no participants"));
    }

    let mut spent: HashMap<ParticipantId, f64> = HashMap::with_capacity(count);
    let mut grand_total = 0.0;
    for expense in ledger.expenses() {
        *spent.entry(expense.participant_id).or_insert(0.0) += expense.amount;
        grand_total += expense.amount;
    }

    let fair_share = grand_total / count as f64;

    let balances = ledger
        .participants()
        .iter()
        .map(|p| {
            let total_spent = spent.get(&p.id).copied().unwrap_or(0.0);
            let balance = total_spent - fair_share;
            ParticipantBalance {
                participant_id: p.id,
                name: p.name.clone(),
                total_spent,
                balance,
                owes: balance < 0.0,
                amount_to_settle: balance.abs(),
            }
        })
        .collect();

    Ok(Settlement {
        grand_total,
        fair_share,
        balances,
    })
}
