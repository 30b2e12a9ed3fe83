pub mod amount;
pub mod date;
pub mod errors;
pub mod table;

pub use amount::{format_colones, normalize_amount};
pub use date::format_transaction_date;
pub use errors::{ErrorKind, SinpeError};
pub use table::Table;
