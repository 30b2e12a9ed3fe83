//! Scripted in-memory gateway for service and command tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::sinpe::{ApiError, Gateway, PageCursor, TransactionPage};
use crate::models::transaction::parse_created_at;
use crate::models::{ContactRef, Transaction, User, SINPE_MOVIL_TYPE};

/// Gateway operations in the order they were issued
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetUser(String),
    UpdateUser { user_id: String, amount: i64 },
    CreateTransaction(Transaction),
    /// The `lastEvaluatedKey` value the request would carry
    ListTransactions(String),
    GetTransaction(String),
}

#[derive(Default)]
pub struct RecordingGateway {
    user: Mutex<Option<User>>,
    pages: Mutex<VecDeque<Result<TransactionPage, ApiError>>>,
    stored: Mutex<Vec<Transaction>>,
    calls: Mutex<Vec<Call>>,
    fail_get_user: bool,
    fail_update: bool,
    fail_create: bool,
    page_gate: Option<Arc<Notify>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        *self.user.lock().unwrap() = Some(user);
        self
    }

    /// Queue a page answer; pages are served in order
    pub fn with_page(self, items: Vec<Transaction>, cursor: Option<serde_json::Value>) -> Self {
        self.pages.lock().unwrap().push_back(Ok(TransactionPage {
            items,
            last_evaluated_key: cursor.map(PageCursor::new),
        }));
        self
    }

    pub fn with_page_error(self) -> Self {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(ApiError::ServerError(503, "unavailable".to_string())));
        self
    }

    pub fn with_stored(self, transaction: Transaction) -> Self {
        self.stored.lock().unwrap().push(transaction);
        self
    }

    pub fn failing_get_user(mut self) -> Self {
        self.fail_get_user = true;
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Hold every `list_transactions` call until the gate is notified
    pub fn with_page_gate(mut self, gate: Arc<Notify>) -> Self {
        self.page_gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn unavailable() -> ApiError {
        ApiError::ServerError(503, "unavailable".to_string())
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        self.record(Call::GetUser(user_id.to_string()));
        if self.fail_get_user {
            return Err(Self::unavailable());
        }
        self.current_user()
            .filter(|u| u.id == user_id)
            .ok_or_else(|| ApiError::NotFound(user_id.to_string()))
    }

    async fn update_user(&self, user_id: &str, user: &User) -> Result<User, ApiError> {
        self.record(Call::UpdateUser {
            user_id: user_id.to_string(),
            amount: user.amount,
        });
        if self.fail_update {
            return Err(Self::unavailable());
        }
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(user.clone())
    }

    async fn create_transaction(&self, transaction: &Transaction) -> Result<Transaction, ApiError> {
        self.record(Call::CreateTransaction(transaction.clone()));
        if self.fail_create {
            return Err(Self::unavailable());
        }
        let stored = Transaction {
            transaction_id: uuid::Uuid::new_v4().to_string(),
            ..transaction.clone()
        };
        self.stored.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_transactions(&self, cursor: Option<&PageCursor>) -> Result<TransactionPage, ApiError> {
        self.record(Call::ListTransactions(
            crate::api::sinpe::client::cursor_query_value(cursor),
        ));
        if let Some(gate) = &self.page_gate {
            gate.notified().await;
        }
        let next = self.pages.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Ok(TransactionPage {
                items: Vec::new(),
                last_evaluated_key: None,
            })
        })
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, ApiError> {
        self.record(Call::GetTransaction(transaction_id.to_string()));
        self.stored
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.transaction_id == transaction_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(transaction_id.to_string()))
    }
}

pub const TEST_USER_ID: &str = "ad677daf-9a6a-446a-b6c2-ce61fa1bc07e";

pub fn user(amount: i64) -> User {
    User {
        id: TEST_USER_ID.to_string(),
        name: "Maria".to_string(),
        last_name: "Vargas".to_string(),
        amount,
        extra: serde_json::Map::new(),
    }
}

/// Stored transaction with the given id and `createdAt`
pub fn tx(id: &str, created_at: &str, amount: i64) -> Transaction {
    Transaction {
        transaction_id: id.to_string(),
        amount,
        created_at: parse_created_at(created_at),
        contact: ContactRef::new("Ana", "Lopez"),
        description: String::new(),
        kind: SINPE_MOVIL_TYPE.to_string(),
    }
}

pub fn ids(transactions: &[Transaction]) -> Vec<&str> {
    transactions.iter().map(|t| t.transaction_id.as_str()).collect()
}
