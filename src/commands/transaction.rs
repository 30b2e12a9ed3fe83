use chrono::Local;

use crate::api::sinpe::Gateway;
use crate::models::Transaction;
use crate::services::transaction_service::{self, PageLoad};
use crate::utils::{format_colones, format_transaction_date, SinpeError, Table};

use super::Session;

/// Show what has been loaded, fetching the first page on first use
pub async fn history<G: Gateway>(session: &Session<G>) -> Result<String, SinpeError> {
    if session.feed.is_empty().await && session.feed.has_more().await {
        session.feed.load_next_page(&session.gateway).await?;
    }
    render_feed(session, None).await
}

pub async fn more<G: Gateway>(session: &Session<G>) -> Result<String, SinpeError> {
    let load = session.feed.load_next_page(&session.gateway).await?;
    render_feed(session, Some(load)).await
}

pub async fn detail<G: Gateway>(session: &Session<G>, args: &[&str]) -> Result<String, SinpeError> {
    let Some(transaction_id) = args.first() else {
        return Ok("Usage: `detail <transaction-id>` (ids are listed by `history`)".to_string());
    };

    let transaction =
        transaction_service::get_transaction_detail(&session.gateway, &session.feed, transaction_id).await?;
    Ok(render_detail(&transaction))
}

async fn render_feed<G: Gateway>(session: &Session<G>, load: Option<PageLoad>) -> Result<String, SinpeError> {
    let state = session.feed.snapshot().await;
    let now = Local::now();

    let mut output = String::from("📋 Movimientos\n");
    if state.transactions.is_empty() {
        output.push_str("No movements yet.\n");
    } else {
        let mut table = Table::new(&["ID", "Movimiento", "Fecha", "Monto"]);
        for transaction in &state.transactions {
            table.add_row(vec![
                transaction.transaction_id.clone(),
                format!("{} - {}", transaction.kind, transaction.contact.name),
                format_transaction_date(&transaction.created_at, &now),
                format!("-{}", format_colones(transaction.amount)),
            ]);
        }
        output.push_str(&table.render());
    }

    if load == Some(PageLoad::InFlight) {
        output.push_str("\nStill loading the previous page...");
    } else if state.has_more {
        output.push_str("\nType `more` to load older movements.");
    } else {
        output.push_str("\nNo more movements.");
    }

    Ok(output)
}

fn render_detail(transaction: &Transaction) -> String {
    let mut detail = format!(
        "📜 Detalle de movimiento\n{} - {} ({})\nMonto: {}\nFecha: {}",
        transaction.kind,
        transaction.contact.full_name(),
        transaction.contact.initials(),
        format_colones(transaction.amount),
        format_transaction_date(&transaction.created_at, &Local::now()),
    );
    if !transaction.description.is_empty() {
        detail.push_str(&format!("\nDescripción: {}", transaction.description));
    }
    detail.push_str(&format!("\nTipo de movimiento: {}", transaction.kind));
    detail.push_str(&format!("\nID: {}", transaction.transaction_id));
    detail
}
