use crate::domain::ids::{ExpenseId, GroupId, UserId};
use crate::error::{Result, SplitError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    Equal,
    Percentage,
    Shares,
    Custom,
}

/// A single shared expense as stored by the backend.
///
/// The split policy decides which participant fields are meaningful: `Custom`
/// reads `amount`, `Percentage` reads `percentage`, `Shares` reads `shares`,
/// `Equal` reads none of them.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Expense {
    pub id: ExpenseId,
    pub group: GroupId,
    pub amount: Decimal,
    pub currency: String,
    pub paid_by: UserId,
    pub split: SplitPolicy,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Participant {
    pub expense: ExpenseId,
    pub user: UserId,
    pub amount: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub shares: Option<u32>,
}

/// An expense joined with its participant rows; the unit the balance engine
/// consumes.
#[derive(Debug, PartialEq, Clone)]
pub struct ExpenseWithParticipants {
    pub expense: Expense,
    pub participants: Vec<Participant>,
}

impl Expense {
    /// Checks the structural invariants a split computation relies on.
    ///
    /// Percentages that do not sum to 100 and custom amounts that do not add
    /// up to the expense total are deliberately left alone; reconciling the
    /// caller's data quality is not this layer's job.
    pub fn validate(&self, participants: &[Participant]) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(SplitError::ValidationError(format!(
                "Expense {} has negative amount {}",
                self.id, self.amount
            )));
        }

        let mut seen = HashSet::with_capacity(participants.len());
        for participant in participants {
            if participant.expense != self.id {
                return Err(SplitError::ValidationError(format!(
                    "Participant {} references expense {}, not {}",
                    participant.user, participant.expense, self.id
                )));
            }
            if !seen.insert(&participant.user) {
                return Err(SplitError::ValidationError(format!(
                    "Duplicate participant {} on expense {}",
                    participant.user, self.id
                )));
            }
        }

        match self.split {
            SplitPolicy::Equal if participants.is_empty() => Err(SplitError::ValidationError(
                format!("Expense {} has no participants to split equally", self.id),
            )),
            SplitPolicy::Shares if total_shares(participants) == 0 => {
                Err(SplitError::ValidationError(format!(
                    "Expense {} has zero total shares",
                    self.id
                )))
            }
            _ => Ok(()),
        }
    }
}

pub(crate) fn total_shares(participants: &[Participant]) -> u64 {
    participants
        .iter()
        .map(|p| u64::from(p.shares.unwrap_or(0)))
        .sum()
}
