use tracing::warn;

use crate::api::sinpe::Gateway;
use crate::models::User;
use crate::utils::SinpeError;

/// Fetch the account fresh from the gateway; balances are never cached
pub async fn get_balance<G: Gateway + ?Sized>(gateway: &G, user_id: &str) -> Result<User, SinpeError> {
    gateway.get_user(user_id).await.map_err(|e| {
        warn!("Failed to fetch user {}: {}", user_id, e);
        SinpeError::Lookup(e)
    })
}
