use std::fs;
use std::path::Path;

use fairshare_ledger::Ledger;

use crate::error::PersistenceResult;

/// Pretty-printed JSON dump of every expense, most recent first.
///
/// Pure serialization of the current state; nothing is mutated.
pub fn export_expenses_json(ledger: &Ledger) -> PersistenceResult<String> {
    Ok(serde_json::to_string_pretty(ledger.expenses())?)
}

/// Write the expense dump to `path` (created or truncated).
pub fn export_expenses_to_file(ledger: &Ledger, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let json = export_expenses_json(ledger)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ledger_with_expenses() -> Ledger {
        let mut ledger = Ledger::seeded();
        let id = ledger.participants()[0].id;
        ledger.add_expense(id, 15.0, "museum tickets").unwrap();
        ledger.add_expense(id, 7.5, "postcards").unwrap();
        ledger
    }

    #[test]
    fn dump_contains_every_expense_most_recent_first() {
        let ledger = ledger_with_expenses();
        let json = export_expenses_json(&ledger).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["description"], "postcards");
        assert_eq!(entries[1]["description"], "museum tickets");

        // Pretty-printed: multi-line with indentation.
        assert!(json.contains("\n  "));
    }

    #[test]
    fn dump_of_an_empty_ledger_is_an_empty_array() {
        let json = export_expenses_json(&Ledger::seeded()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn export_writes_the_dump_to_a_file() {
        let ledger = ledger_with_expenses();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("expenses.json");

        export_expenses_to_file(&ledger, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, export_expenses_json(&ledger).unwrap());
    }
}
