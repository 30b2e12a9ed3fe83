use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::sinpe::{ApiError, Gateway, PageCursor};
use crate::models::Transaction;
use crate::utils::SinpeError;

/// Merge a freshly fetched page into the list fetched so far.
///
/// The result holds one entry per `transaction_id`, newest `created_at`
/// first. When an id appears more than once the last occurrence in
/// `existing ++ incoming` wins, so a page copy replaces a cached one.
/// Equal timestamps keep their relative order from that concatenation.
pub fn merge_transactions(existing: &[Transaction], incoming: &[Transaction]) -> Vec<Transaction> {
    let mut seen = HashSet::with_capacity(existing.len() + incoming.len());
    let mut merged: Vec<Transaction> = existing
        .iter()
        .chain(incoming)
        .rev()
        .filter(|t| seen.insert(t.transaction_id.as_str()))
        .cloned()
        .collect();
    merged.reverse();

    // sort_by is stable
    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    merged
}

/// Everything the history view renders
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub cursor: Option<PageCursor>,
    pub has_more: bool,
    pub transactions: Vec<Transaction>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            cursor: None,
            has_more: true,
            transactions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    /// A page arrived and was merged
    Loaded { received: usize },
    /// The gateway already said there is nothing after the last page
    Exhausted,
    /// Another load on this feed has not finished; nothing was requested
    InFlight,
}

/// Incrementally loaded transaction history
#[derive(Debug, Default)]
pub struct TransactionFeed {
    state: Mutex<FeedState>,
    loading: AtomicBool,
}

/// Clears the in-flight flag however the load ends
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TransactionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> FeedState {
        self.state.lock().await.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.state.lock().await.has_more
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.transactions.is_empty()
    }

    /// Look a transaction up among those already loaded
    pub async fn find(&self, transaction_id: &str) -> Option<Transaction> {
        self.state
            .lock()
            .await
            .transactions
            .iter()
            .find(|t| t.transaction_id == transaction_id)
            .cloned()
    }

    /// Fetch the page after the current cursor and merge it in.
    ///
    /// At most one load runs per feed. A failed fetch leaves the state as it
    /// was; calling again retries from the same cursor.
    pub async fn load_next_page<G: Gateway + ?Sized>(&self, gateway: &G) -> Result<PageLoad, SinpeError> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            debug!("Transaction page load already in flight, skipping");
            return Ok(PageLoad::InFlight);
        }
        let _guard = LoadingGuard(&self.loading);

        let cursor = {
            let state = self.state.lock().await;
            if !state.has_more {
                return Ok(PageLoad::Exhausted);
            }
            state.cursor.clone()
        };

        let page = gateway.list_transactions(cursor.as_ref()).await.map_err(|e| {
            warn!("Failed to load transaction page: {}", e);
            SinpeError::PageLoad(e)
        })?;

        let received = page.items.len();
        let mut state = self.state.lock().await;
        state.transactions = merge_transactions(&state.transactions, &page.items);
        state.has_more = page.last_evaluated_key.is_some();
        state.cursor = page.last_evaluated_key;

        info!(
            "Loaded {} transactions ({} total, more: {})",
            received,
            state.transactions.len(),
            state.has_more
        );
        Ok(PageLoad::Loaded { received })
    }
}

/// Transaction details, from the loaded history when possible
pub async fn get_transaction_detail<G: Gateway + ?Sized>(
    gateway: &G,
    feed: &TransactionFeed,
    transaction_id: &str,
) -> Result<Transaction, SinpeError> {
    if let Some(transaction) = feed.find(transaction_id).await {
        return Ok(transaction);
    }

    gateway.get_transaction(transaction_id).await.map_err(|e| match e {
        ApiError::NotFound(_) => SinpeError::Validation(format!("No movement with id `{}`", transaction_id)),
        e => {
            warn!("Failed to fetch transaction {}: {}", transaction_id, e);
            SinpeError::Lookup(e)
        }
    })
}
