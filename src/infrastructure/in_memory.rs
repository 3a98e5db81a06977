use crate::domain::expense::{Expense, ExpenseWithParticipants, Participant};
use crate::domain::ids::{GroupId, UserId};
use crate::domain::ports::{ExpenseStore, GroupStore};
use crate::domain::settlement::Transfer;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for expenses.
///
/// Uses `Arc<RwLock<Vec<…>>>` to allow shared concurrent access. Rows keep
/// insertion order, which downstream settlement relies on for deterministic
/// tie-breaking. Ideal for testing or small datasets where persistence is
/// not required.
#[derive(Default, Clone)]
pub struct InMemoryExpenseStore {
    expenses: Arc<RwLock<Vec<ExpenseWithParticipants>>>,
}

impl InMemoryExpenseStore {
    /// Creates a new, empty in-memory expense store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for InMemoryExpenseStore {
    async fn add_expense(&self, expense: Expense, participants: Vec<Participant>) -> Result<()> {
        let mut expenses = self.expenses.write().await;
        expenses.push(ExpenseWithParticipants {
            expense,
            participants,
        });
        Ok(())
    }

    async fn expenses(&self, group: Option<&GroupId>) -> Result<Vec<ExpenseWithParticipants>> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .iter()
            .filter(|entry| group.is_none_or(|group| entry.expense.group == *group))
            .cloned()
            .collect())
    }
}

/// A thread-safe in-memory store for group membership and recorded
/// payments.
#[derive(Default, Clone)]
pub struct InMemoryGroupStore {
    members: Arc<RwLock<HashMap<GroupId, Vec<UserId>>>>,
    payments: Arc<RwLock<HashMap<GroupId, Vec<Transfer>>>>,
}

impl InMemoryGroupStore {
    /// Creates a new, empty in-memory group store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for InMemoryGroupStore {
    async fn add_member(&self, group: &GroupId, user: UserId) -> Result<()> {
        let mut members = self.members.write().await;
        let roster = members.entry(group.clone()).or_default();
        if !roster.contains(&user) {
            roster.push(user);
        }
        Ok(())
    }

    async fn members(&self, group: &GroupId) -> Result<Vec<UserId>> {
        let members = self.members.read().await;
        Ok(members.get(group).cloned().unwrap_or_default())
    }

    async fn record_payment(&self, group: &GroupId, transfer: Transfer) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.entry(group.clone()).or_default().push(transfer);
        Ok(())
    }

    async fn payments(&self, group: &GroupId) -> Result<Vec<Transfer>> {
        let payments = self.payments.read().await;
        Ok(payments.get(group).cloned().unwrap_or_default())
    }
}
