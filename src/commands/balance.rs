use crate::api::sinpe::Gateway;
use crate::services::balance_service;
use crate::utils::{format_colones, SinpeError};

use super::Session;

pub async fn execute<G: Gateway>(session: &Session<G>) -> Result<String, SinpeError> {
    let user = balance_service::get_balance(&session.gateway, &session.user_id).await?;

    Ok(format!(
        "💰 Cuenta Colones ({})\nSaldo disponible: {}",
        user.full_name(),
        format_colones(user.amount)
    ))
}
