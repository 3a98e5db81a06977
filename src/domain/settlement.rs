use crate::domain::balance::UserBalance;
use crate::domain::ids::UserId;
use crate::domain::money::Amount;
use crate::error::{Result, SplitError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Largest residual the reducer tolerates before refusing to settle.
///
/// Split quotients keep full decimal precision, so a 100/3 equal split leaves
/// sub-cent residue in the balance sheet; anything up to one cent is dropped,
/// anything beyond it means the inputs are inconsistent.
pub const RESIDUAL_EPSILON: Decimal = dec!(0.01);

/// A single directed payment instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: UserId,
    pub to: UserId,
    pub amount: Amount,
}

/// Reduces a balance sheet to a list of settling transfers.
///
/// Greedy largest-first matching: creditors and debtors are stable-sorted
/// descending by amount (ties keep input order, which makes the output
/// deterministic), then walked with two cursors settling
/// `min(creditor, debtor)` at each step. Every step zeroes at least one
/// side, so the walk is linear after the sort.
///
/// This does not chase the theoretical minimum transfer count (a partition
/// problem); for the group sizes involved the greedy plan is close enough
/// and predictable.
pub fn simplify_debts(balances: &[UserBalance]) -> Result<Vec<Transfer>> {
    let residual: Decimal = balances.iter().map(|entry| entry.balance.value()).sum();
    if residual.abs() > RESIDUAL_EPSILON {
        return Err(SplitError::ResidualImbalance { residual });
    }

    // Working copies: the greedy walk decrements these, never the caller's
    // balance entries.
    let mut creditors: Vec<(UserId, Decimal)> = Vec::new();
    let mut debtors: Vec<(UserId, Decimal)> = Vec::new();
    for entry in balances {
        let value = entry.balance.value();
        if value > Decimal::ZERO {
            creditors.push((entry.user.clone(), value));
        } else if value < Decimal::ZERO {
            debtors.push((entry.user.clone(), value.abs()));
        }
    }

    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::new();
    let mut credit_idx = 0;
    let mut debit_idx = 0;

    while credit_idx < creditors.len() && debit_idx < debtors.len() {
        let creditor = &mut creditors[credit_idx];
        let settled = creditor.1.min(debtors[debit_idx].1);

        transfers.push(Transfer {
            from: debtors[debit_idx].0.clone(),
            to: creditor.0.clone(),
            amount: Amount::new(settled)?,
        });

        creditor.1 -= settled;
        debtors[debit_idx].1 -= settled;

        if creditors[credit_idx].1.is_zero() {
            credit_idx += 1;
        }
        if debtors[debit_idx].1.is_zero() {
            debit_idx += 1;
        }
    }

    Ok(transfers)
}
