use crate::domain::expense::ExpenseWithParticipants;
use crate::domain::ids::{ExpenseId, UserId};
use crate::domain::money::Balance;
use crate::domain::split::compute_split;
use serde::Serialize;
use std::collections::HashMap;

/// One user's signed net position within a balance sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBalance {
    pub user: UserId,
    pub balance: Balance,
}

/// An expense whose split could not be computed; its contribution is dropped
/// from the sheet rather than silently zeroed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedExpense {
    pub expense: ExpenseId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub balances: Vec<UserBalance>,
    pub skipped: Vec<SkippedExpense>,
}

/// Computes one user's net balance across a set of expenses.
///
/// The payer of an expense is credited its full amount for fronting the
/// cost; every participant is debited their computed share. Traversal order
/// does not change the result.
pub fn user_balance(
    user: &UserId,
    expenses: &[ExpenseWithParticipants],
) -> (Balance, Vec<SkippedExpense>) {
    let mut balance = Balance::ZERO;
    let mut skipped = Vec::new();

    for entry in expenses {
        let split = match compute_split(&entry.expense, &entry.participants) {
            Ok(split) => split,
            Err(error) => {
                skipped.push(SkippedExpense {
                    expense: entry.expense.id.clone(),
                    reason: error.to_string(),
                });
                continue;
            }
        };

        if entry.expense.paid_by == *user {
            balance += Balance::new(entry.expense.amount);
        }
        if let Some(share) = split.get(user) {
            balance -= *share;
        }
    }

    (balance, skipped)
}

/// Computes net balances for every listed user in one pass over the
/// expenses.
///
/// Equivalent to applying [`user_balance`] per user: credits and debits only
/// land on tracked users, and addition commutes. Balances come back in the
/// order of the `users` slice, which downstream settlement relies on for
/// deterministic tie-breaking; each failing expense is reported once.
pub fn group_balances(expenses: &[ExpenseWithParticipants], users: &[UserId]) -> BalanceSheet {
    let mut totals: HashMap<&UserId, Balance> =
        users.iter().map(|user| (user, Balance::ZERO)).collect();
    let mut skipped = Vec::new();

    for entry in expenses {
        let split = match compute_split(&entry.expense, &entry.participants) {
            Ok(split) => split,
            Err(error) => {
                skipped.push(SkippedExpense {
                    expense: entry.expense.id.clone(),
                    reason: error.to_string(),
                });
                continue;
            }
        };

        if let Some(balance) = totals.get_mut(&entry.expense.paid_by) {
            *balance += Balance::new(entry.expense.amount);
        }
        for (user, share) in &split {
            if let Some(balance) = totals.get_mut(user) {
                *balance -= *share;
            }
        }
    }

    let balances = users
        .iter()
        .map(|user| UserBalance {
            user: user.clone(),
            balance: totals[user],
        })
        .collect();

    BalanceSheet { balances, skipped }
}
