use clap::Parser;
use dutch::application::engine::{GroupSettlement, SettlementEngine};
use dutch::domain::expense::Participant;
use dutch::domain::ids::{ExpenseId, GroupId};
use dutch::domain::ports::{ExpenseStore, ExpenseStoreBox, GroupStore, GroupStoreBox};
use dutch::domain::summary::format_currency;
use dutch::infrastructure::in_memory::{InMemoryExpenseStore, InMemoryGroupStore};
use dutch::interfaces::csv::expense_reader::{ExpenseReader, ParticipantReader};
use dutch::interfaces::csv::transfer_writer::TransferWriter;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input expenses CSV file
    expenses: PathBuf,

    /// Input participants CSV file
    participants: PathBuf,

    /// Only settle this group; by default every group in the input is settled
    #[arg(long)]
    group: Option<String>,

    /// Emit settlements as JSON instead of transfer CSV rows
    #[arg(long)]
    json: bool,

    /// Print a per-group expense summary to stderr
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    let only_group = cli.group.map(GroupId);

    // Join participant rows onto their expenses up front; rows that fail to
    // parse are dropped with a warning, matching how the engine treats
    // uncomputable expenses.
    let file = File::open(&cli.participants).into_diagnostic()?;
    let mut participants_by_expense: HashMap<ExpenseId, Vec<Participant>> = HashMap::new();
    for row in ParticipantReader::new(file).participants() {
        match row {
            Ok(participant) => participants_by_expense
                .entry(participant.expense.clone())
                .or_default()
                .push(participant),
            Err(error) => tracing::warn!(%error, "Skipping malformed participant row"),
        }
    }

    let expense_store = InMemoryExpenseStore::new();
    let group_store = InMemoryGroupStore::new();
    let mut groups: Vec<GroupId> = Vec::new();

    let file = File::open(&cli.expenses).into_diagnostic()?;
    let mut currencies: HashMap<GroupId, String> = HashMap::new();
    for row in ExpenseReader::new(file).expenses() {
        let expense = match row {
            Ok(expense) => expense,
            Err(error) => {
                tracing::warn!(%error, "Skipping malformed expense row");
                continue;
            }
        };
        if only_group.as_ref().is_some_and(|group| *group != expense.group) {
            continue;
        }

        if !groups.contains(&expense.group) {
            groups.push(expense.group.clone());
        }
        currencies
            .entry(expense.group.clone())
            .or_insert_with(|| expense.currency.clone());

        // Membership is derived from the data: whoever paid or participated
        // belongs to the group's balance sheet.
        let participants = participants_by_expense
            .remove(&expense.id)
            .unwrap_or_default();
        group_store
            .add_member(&expense.group, expense.paid_by.clone())
            .await
            .into_diagnostic()?;
        for participant in &participants {
            group_store
                .add_member(&expense.group, participant.user.clone())
                .await
                .into_diagnostic()?;
        }
        expense_store
            .add_expense(expense, participants)
            .await
            .into_diagnostic()?;
    }

    let engine = SettlementEngine::new(
        Box::new(expense_store) as ExpenseStoreBox,
        Box::new(group_store) as GroupStoreBox,
    );

    let mut settlements: Vec<GroupSettlement> = Vec::new();
    for group in &groups {
        if cli.summary {
            let summary = engine.summary(group).await.into_diagnostic()?;
            let currency = currencies.get(group).map(String::as_str).unwrap_or("USD");
            eprintln!(
                "{group}: {} expenses totalling {} (avg {})",
                summary.count,
                format_currency(summary.total, currency),
                format_currency(summary.average, currency),
            );
        }
        settlements.push(engine.settle_group(group).await.into_diagnostic()?);
    }

    let stdout = io::stdout();
    if cli.json {
        serde_json::to_writer_pretty(stdout.lock(), &settlements).into_diagnostic()?;
        println!();
    } else {
        let mut writer = TransferWriter::new(stdout.lock());
        writer.write_settlements(&settlements).into_diagnostic()?;
    }

    Ok(())
}
