use crate::domain::expense::{Expense, ExpenseWithParticipants, Participant};
use crate::domain::ids::{GroupId, UserId};
use crate::domain::settlement::Transfer;
use crate::error::Result;
use async_trait::async_trait;

/// Data-access collaborator for expenses, normally backed by the hosted
/// store. Every call is fallible and async because the real implementation
/// sits behind a network.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn add_expense(&self, expense: Expense, participants: Vec<Participant>) -> Result<()>;
    /// Expenses joined with their participants, optionally filtered by group.
    async fn expenses(&self, group: Option<&GroupId>) -> Result<Vec<ExpenseWithParticipants>>;
}

/// Data-access collaborator for group membership and recorded payments.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn add_member(&self, group: &GroupId, user: UserId) -> Result<()>;
    async fn members(&self, group: &GroupId) -> Result<Vec<UserId>>;
    async fn record_payment(&self, group: &GroupId, transfer: Transfer) -> Result<()>;
    async fn payments(&self, group: &GroupId) -> Result<Vec<Transfer>>;
}

pub type ExpenseStoreBox = Box<dyn ExpenseStore>;
pub type GroupStoreBox = Box<dyn GroupStore>;
