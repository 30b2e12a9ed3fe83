use thiserror::Error;

use crate::api::sinpe::ApiError;

/// Kind of failure, without the payload. Recorded in `TransferStage::Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Lookup,
    InsufficientFunds,
    Update,
    Creation,
    PageLoad,
    ContactBook,
}

/// Every error the command layer can see. Gateway errors never escape unwrapped.
#[derive(Debug, Error)]
pub enum SinpeError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Failed to fetch sender account: {0}")]
    Lookup(#[source] ApiError),
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientFunds { requested: i64, available: i64 },
    #[error("Failed to update sender balance: {0}")]
    Update(#[source] ApiError),
    #[error("Account debited but transaction record failed: {0}")]
    Creation(#[source] ApiError),
    #[error("Failed to load transactions: {0}")]
    PageLoad(#[source] ApiError),
    #[error("Failed to load contacts: {0}")]
    ContactBook(String),
}

impl SinpeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SinpeError::Validation(_) => ErrorKind::Validation,
            SinpeError::Lookup(_) => ErrorKind::Lookup,
            SinpeError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            SinpeError::Update(_) => ErrorKind::Update,
            SinpeError::Creation(_) => ErrorKind::Creation,
            SinpeError::PageLoad(_) => ErrorKind::PageLoad,
            SinpeError::ContactBook(_) => ErrorKind::ContactBook,
        }
    }

    /// Message shown to the user; technical detail goes to the logs instead
    pub fn user_message(&self) -> String {
        match self {
            SinpeError::Validation(reason) => format!("❌ {}", reason),
            SinpeError::Lookup(_) => {
                "⚠️ Could not fetch your account data. Please try again.".to_string()
            }
            SinpeError::InsufficientFunds { available, .. } => format!(
                "❌ You don't have enough balance for this transfer. Available: {}",
                crate::utils::format_colones(*available)
            ),
            SinpeError::Update(_) => {
                "❌ The transfer could not be completed. Your balance was not changed.".to_string()
            }
            SinpeError::Creation(_) => {
                "⚠️ Your balance was debited but the movement could not be recorded. Please contact support."
                    .to_string()
            }
            SinpeError::PageLoad(_) => {
                "⚠️ Could not load your movements. Run the command again to retry.".to_string()
            }
            SinpeError::ContactBook(reason) => format!("❌ Could not open your contacts: {}", reason),
        }
    }
}
