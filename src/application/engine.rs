use crate::domain::balance::{SkippedExpense, UserBalance, group_balances};
use crate::domain::ids::GroupId;
use crate::domain::ports::{ExpenseStoreBox, GroupStoreBox};
use crate::domain::settlement::{Transfer, simplify_debts};
use crate::domain::summary::{ExpenseSummary, expense_summary};
use crate::error::Result;
use serde::Serialize;

/// A settled group: the balance sheet it was derived from and the transfers
/// that clear it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSettlement {
    pub group: GroupId,
    pub balances: Vec<UserBalance>,
    pub transfers: Vec<Transfer>,
    pub skipped: Vec<SkippedExpense>,
}

/// The main entry point for settling shared expenses.
///
/// `SettlementEngine` owns the storage backends; every computation fetches
/// fresh rows through the ports, so settlements always reflect the current
/// state of the store.
pub struct SettlementEngine {
    expense_store: ExpenseStoreBox,
    group_store: GroupStoreBox,
}

impl SettlementEngine {
    pub fn new(expense_store: ExpenseStoreBox, group_store: GroupStoreBox) -> Self {
        Self {
            expense_store,
            group_store,
        }
    }

    /// Computes the group's balance sheet and reduces it to transfers.
    ///
    /// Expenses whose split cannot be computed are dropped from the sheet
    /// and reported in `skipped`; the rest settle normally.
    pub async fn settle_group(&self, group: &GroupId) -> Result<GroupSettlement> {
        let members = self.group_store.members(group).await?;
        let expenses = self.expense_store.expenses(Some(group)).await?;

        let sheet = group_balances(&expenses, &members);
        for skipped in &sheet.skipped {
            tracing::warn!(
                expense = %skipped.expense,
                reason = %skipped.reason,
                "Skipping expense with uncomputable split"
            );
        }

        let transfers = simplify_debts(&sheet.balances)?;
        tracing::debug!(
            group = %group,
            members = members.len(),
            expenses = expenses.len(),
            transfers = transfers.len(),
            "Settled group"
        );

        Ok(GroupSettlement {
            group: group.clone(),
            balances: sheet.balances,
            transfers,
            skipped: sheet.skipped,
        })
    }

    /// Records every transfer of a settlement as a payment.
    pub async fn record_settlement(&self, settlement: &GroupSettlement) -> Result<()> {
        for transfer in &settlement.transfers {
            self.group_store
                .record_payment(&settlement.group, transfer.clone())
                .await?;
        }
        Ok(())
    }

    pub async fn summary(&self, group: &GroupId) -> Result<ExpenseSummary> {
        let expenses = self.expense_store.expenses(Some(group)).await?;
        Ok(expense_summary(&expenses))
    }
}
