use tracing::warn;

use crate::api::sinpe::Gateway;
use crate::models::{Transaction, TransferRequest};
use crate::services::{balance_service, send_service};
use crate::utils::{format_colones, normalize_amount, SinpeError};

use super::Session;

const USAGE: &str = "💸 Send money\n\
    Usage: `send <contact-id> <amount> [detail]`\n\
    Example: `send 1 ₡2.000 almuerzo`\n\
    Use `contacts` to find a contact id.";

pub async fn execute<G: Gateway>(session: &Session<G>, args: &[&str]) -> Result<String, SinpeError> {
    if args.len() < 2 {
        return Ok(USAGE.to_string());
    }

    let contact = session
        .contacts
        .get(args[0])
        .ok_or_else(|| SinpeError::Validation(format!("No contact with id `{}`", args[0])))?;
    let amount = normalize_amount(args[1])?;
    let description = args[2..].join(" ");

    let request = TransferRequest {
        sender_id: session.user_id.clone(),
        recipient: contact.as_recipient(),
        amount,
        description,
    };
    let created = send_service::execute_send(&session.gateway, request).await?;

    let mut receipt = render_receipt(&created);
    // Same as the home screen reloading after a transfer
    match balance_service::get_balance(&session.gateway, &session.user_id).await {
        Ok(user) => receipt.push_str(&format!("\nSaldo disponible: {}", format_colones(user.amount))),
        Err(e) => warn!("Transfer done but balance refresh failed: {}", e),
    }

    Ok(receipt)
}

fn render_receipt(transaction: &Transaction) -> String {
    let mut receipt = format!(
        "✅ Transfer Successful\nTo: {} ({})\nAmount: {}",
        transaction.contact.full_name(),
        transaction.contact.initials(),
        format_colones(transaction.amount)
    );
    if !transaction.description.is_empty() {
        receipt.push_str(&format!("\nDetail: {}", transaction.description));
    }
    receipt.push_str(&format!("\nID: {}", transaction.transaction_id));
    receipt
}
