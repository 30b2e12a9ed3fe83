pub mod balance_service;
pub mod contact_service;
pub mod send_service;
pub mod transaction_service;
