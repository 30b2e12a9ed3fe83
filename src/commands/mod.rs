pub mod balance;
pub mod contacts;
pub mod help;
pub mod send;
pub mod transaction;

use tracing::warn;

use crate::api::sinpe::Gateway;
use crate::services::contact_service::ContactBook;
use crate::services::transaction_service::TransactionFeed;

/// What a command runs against: the gateway, the signed-in account and the
/// client-side state that outlives a single command.
pub struct Session<G: Gateway> {
    pub gateway: G,
    pub user_id: String,
    pub contacts: ContactBook,
    pub feed: TransactionFeed,
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G, user_id: String, contacts: ContactBook) -> Self {
        Self {
            gateway,
            user_id,
            contacts,
            feed: TransactionFeed::new(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show; empty for blank lines
    Continue(String),
    Quit,
}

pub async fn handle_line<G: Gateway>(session: &Session<G>, line: &str) -> Outcome {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Outcome::Continue(String::new());
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "help" | "?" => Ok(help::execute()),
        "balance" | "bal" => balance::execute(session).await,
        "contacts" | "contactos" => contacts::execute(session, args).await,
        "send" | "sinpe" => send::execute(session, args).await,
        "history" | "movimientos" => transaction::history(session).await,
        "more" => transaction::more(session).await,
        "detail" => transaction::detail(session, args).await,
        "exit" | "quit" => return Outcome::Quit,
        _ => Ok(format!("Unknown command `{}`. Type `help` to see what you can do.", parts[0])),
    };

    match result {
        Ok(output) => Outcome::Continue(output),
        Err(e) => {
            warn!("Command {} failed: {}", command, e);
            Outcome::Continue(e.user_message())
        }
    }
}
