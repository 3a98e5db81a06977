use crate::domain::expense::ExpenseWithParticipants;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
}

pub fn expense_summary(expenses: &[ExpenseWithParticipants]) -> ExpenseSummary {
    let total: Decimal = expenses.iter().map(|entry| entry.expense.amount).sum();
    let count = expenses.len();
    let average = if count > 0 {
        total / Decimal::from(count as u64)
    } else {
        Decimal::ZERO
    };

    ExpenseSummary {
        total,
        count,
        average,
    }
}

/// Renders an amount in its currency's conventional style.
///
/// Amounts are rounded half-away-from-zero to the currency's minor unit.
/// Codes without a known symbol fall back to `"CODE amount"`.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let (symbol, scale) = currency_style(currency);
    let rounded = amount
        .abs()
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    match symbol {
        Some(symbol) => format!("{sign}{symbol}{rounded:.prec$}", prec = scale as usize),
        None => format!("{sign}{currency} {rounded:.prec$}", prec = scale as usize),
    }
}

fn currency_style(currency: &str) -> (Option<&'static str>, u32) {
    match currency {
        "USD" => (Some("$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        _ => (None, 2),
    }
}
