//! fairshare — track shared expenses and settle up evenly.
//!
//! Subcommands: status, add-participant, rename, remove, add-expense,
//! expenses, balances, export, reset.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use fairshare_cli::Session;
use fairshare_core::ParticipantId;
use fairshare_notify::{Notifier, TracingNotifier};
use fairshare_persistence::{FileKeyValueStore, KeyValueStore};
use fairshare_settlement::BALANCE_EPSILON;

/// How many expenses the status view shows.
const RECENT_LIMIT: usize = 5;

/// Split shared expenses evenly across a group.
#[derive(Parser, Debug)]
#[command(name = "fairshare", version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved ledger (defaults to the OS data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level when RUST_LOG is unset.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show participants, balances, and recent expenses.
    Status,
    /// Add a participant (auto-named "Person N").
    AddParticipant,
    /// Rename a participant.
    Rename(RenameArgs),
    /// Remove a participant and every expense they own.
    Remove(RemoveArgs),
    /// Record an expense for a participant.
    AddExpense(AddExpenseArgs),
    /// List expenses, most recent first.
    Expenses(ExpensesArgs),
    /// Show the settlement table.
    Balances,
    /// Export all expenses as pretty-printed JSON.
    Export(ExportArgs),
    /// Clear saved data; the next run starts from the default ledger.
    Reset,
}

#[derive(Args, Debug)]
struct RenameArgs {
    /// Participant id.
    id: ParticipantId,
    /// New display name.
    name: String,
}

#[derive(Args, Debug)]
struct RemoveArgs {
    /// Participant id.
    id: ParticipantId,
}

#[derive(Args, Debug)]
struct AddExpenseArgs {
    /// Participant who paid.
    id: ParticipantId,
    /// Amount in your group's currency unit.
    amount: f64,
    /// What the money was spent on.
    description: String,
}

#[derive(Args, Debug)]
struct ExpensesArgs {
    /// Maximum number of expenses to show.
    #[arg(long, default_value_t = RECENT_LIMIT)]
    limit: usize,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        fairshare_observability::init_with_default_filter("debug");
    } else {
        fairshare_observability::init();
    }

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    tracing::debug!(path = %data_dir.display(), "using data directory");

    let store = FileKeyValueStore::open(&data_dir)
        .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;
    let mut session =
        Session::open(store, TracingNotifier).context("failed to load saved ledger")?;

    match cli.command {
        Commands::Status => status(&session)?,
        Commands::AddParticipant => {
            let participant = session.add_participant()?;
            println!("Added {} ({})", participant.name, participant.id);
        }
        Commands::Rename(args) => {
            session.rename_participant(args.id, args.name.as_str())?;
            println!("Renamed {} to \"{}\"", args.id, args.name);
        }
        Commands::Remove(args) => {
            session.remove_participant(args.id)?;
            println!("Removed {}", args.id);
        }
        Commands::AddExpense(args) => {
            let expense =
                session.add_expense(args.id, args.amount, args.description.as_str())?;
            println!(
                "Recorded {:.2} for {} ({})",
                expense.amount, expense.description, expense.id
            );
        }
        Commands::Expenses(args) => expenses(&session, args.limit),
        Commands::Balances => balances(&session)?,
        Commands::Export(args) => match args.output {
            Some(path) => {
                session.export_to_file(&path)?;
                println!("Wrote {}", path.display());
            }
            None => println!("{}", session.export_json()?),
        },
        Commands::Reset => {
            session.reset()?;
            println!("Saved data cleared.");
        }
    }

    Ok(())
}

/// Resolve the default data directory: `{os_data_dir}/fairshare`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("fairshare"))
}

fn status<S: KeyValueStore, N: Notifier>(session: &Session<S, N>) -> anyhow::Result<()> {
    let ledger = session.ledger();
    let settlement = session.settlement()?;

    println!("Participants ({}):", ledger.participant_count());
    for balance in &settlement.balances {
        println!(
            "  {}  {}  spent {:.2}  balance {:+.2}",
            balance.participant_id, balance.name, balance.total_spent, balance.balance
        );
    }

    println!();
    println!("Recent expenses:");
    if ledger.expense_count() == 0 {
        println!("  (none)");
    }
    for expense in ledger.recent_expenses(RECENT_LIMIT) {
        let payer = ledger
            .participant(expense.participant_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!(
            "  {}  {:.2}  {}  ({})",
            expense.created_at.format("%Y-%m-%d %H:%M"),
            expense.amount,
            expense.description,
            payer
        );
    }

    println!();
    if settlement.is_settled() {
        println!("All settled: spending is split evenly.");
    } else {
        println!(
            "Total {:.2}, fair share {:.2} per person.",
            settlement.grand_total, settlement.fair_share
        );
    }

    Ok(())
}

fn expenses<S: KeyValueStore, N: Notifier>(session: &Session<S, N>, limit: usize) {
    let ledger = session.ledger();
    if ledger.expense_count() == 0 {
        println!("No expenses recorded.");
        return;
    }

    for expense in ledger.recent_expenses(limit) {
        let payer = ledger
            .participant(expense.participant_id)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        println!(
            "{}  {}  {:.2}  {}  ({})",
            expense.id,
            expense.created_at.format("%Y-%m-%d %H:%M"),
            expense.amount,
            expense.description,
            payer
        );
    }
}

fn balances<S: KeyValueStore, N: Notifier>(session: &Session<S, N>) -> anyhow::Result<()> {
    let settlement = session.settlement()?;

    println!(
        "Total {:.2}, fair share {:.2} per person.",
        settlement.grand_total, settlement.fair_share
    );
    for balance in &settlement.balances {
        let position = if balance.balance.abs() <= BALANCE_EPSILON {
            "settled".to_string()
        } else if balance.owes {
            format!("owes {:.2}", balance.amount_to_settle)
        } else {
            format!("receives {:.2}", balance.amount_to_settle)
        };
        println!(
            "  {}  spent {:.2}  {}",
            balance.name, balance.total_spent, position
        );
    }

    Ok(())
}
