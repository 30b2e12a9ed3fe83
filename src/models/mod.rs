//! Data models shared by the gateway, services and commands

pub mod contact;
pub mod transaction;
pub mod transfer;
pub mod user;

pub use contact::{Contact, ContactGroup, PhoneNumber};
pub use transaction::{ContactRef, Transaction, SINPE_MOVIL_TYPE};
pub use transfer::{TransferRequest, TransferStage};
pub use user::User;
