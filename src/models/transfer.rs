//! Send/transfer models

use crate::utils::ErrorKind;

use super::transaction::ContactRef;

/// What the user asked for on the send screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub sender_id: String,
    pub recipient: ContactRef,
    /// Colones, already normalized from the user's input
    pub amount: i64,
    pub description: String,
}

/// Where a transfer attempt currently stands. Attempts only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStage {
    Idle,
    Validating,
    CheckingBalance,
    DebitingAccount,
    RecordingTransaction,
    Succeeded,
    Failed(ErrorKind),
}
