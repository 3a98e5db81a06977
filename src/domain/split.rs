use crate::domain::expense::{Expense, Participant, SplitPolicy, total_shares};
use crate::domain::ids::UserId;
use crate::domain::money::Balance;
use crate::error::{Result, SplitError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Computes how much each participant owes for a single expense.
///
/// The returned mapping holds exactly one entry per participant; members
/// without a weight under `Percentage`/`Shares` appear with a zero share so
/// that callers never have to distinguish "absent" from "owes nothing".
///
/// Percentages are applied as given even when they do not sum to 100, and
/// custom amounts are taken verbatim without reconciling them against the
/// expense total.
pub fn compute_split(
    expense: &Expense,
    participants: &[Participant],
) -> Result<HashMap<UserId, Balance>> {
    expense.validate(participants)?;

    let mut split = HashMap::with_capacity(participants.len());
    match expense.split {
        SplitPolicy::Equal => {
            let share = checked(
                expense
                    .amount
                    .checked_div(Decimal::from(participants.len() as u64)),
                expense,
            )?;
            for participant in participants {
                split.insert(participant.user.clone(), Balance::new(share));
            }
        }
        SplitPolicy::Percentage => {
            for participant in participants {
                let share = match participant.percentage {
                    Some(percentage) => checked(
                        expense
                            .amount
                            .checked_mul(percentage)
                            .and_then(|value| value.checked_div(dec!(100))),
                        expense,
                    )?,
                    None => Decimal::ZERO,
                };
                split.insert(participant.user.clone(), Balance::new(share));
            }
        }
        SplitPolicy::Shares => {
            let total = Decimal::from(total_shares(participants));
            for participant in participants {
                let share = match participant.shares {
                    Some(shares) if shares > 0 => checked(
                        expense
                            .amount
                            .checked_mul(Decimal::from(shares))
                            .and_then(|value| value.checked_div(total)),
                        expense,
                    )?,
                    _ => Decimal::ZERO,
                };
                split.insert(participant.user.clone(), Balance::new(share));
            }
        }
        SplitPolicy::Custom => {
            for participant in participants {
                let share = participant.amount.unwrap_or(Decimal::ZERO);
                split.insert(participant.user.clone(), Balance::new(share));
            }
        }
    }

    Ok(split)
}

fn checked(value: Option<Decimal>, expense: &Expense) -> Result<Decimal> {
    value.ok_or_else(|| {
        SplitError::ArithmeticAnomaly(format!(
            "Share computation failed for expense {}",
            expense.id
        ))
    })
}
