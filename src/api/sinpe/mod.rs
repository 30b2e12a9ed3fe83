pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::models::{Transaction, User};

pub use client::SinpeClient;
pub use models::{ApiError, PageCursor, TransactionPage};

/// The remote service that owns users and transactions.
///
/// Services only talk to this trait so the HTTP client can be swapped for a
/// scripted one in tests.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<User, ApiError>;

    /// Full-record replace of the user
    async fn update_user(&self, user_id: &str, user: &User) -> Result<User, ApiError>;

    /// `transaction.transaction_id` is sent empty; the response carries the assigned one
    async fn create_transaction(&self, transaction: &Transaction) -> Result<Transaction, ApiError>;

    async fn list_transactions(&self, cursor: Option<&PageCursor>) -> Result<TransactionPage, ApiError>;

    async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, ApiError>;
}
