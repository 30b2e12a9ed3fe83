//! Send money to a contact.
//!
//! A transfer is three dependent gateway calls: read the sender, write the
//! debited sender, write the transaction record. The backend offers no
//! transfer endpoint, so nothing ties the last two together. If the record
//! write fails after the debit succeeded, the account stays debited and the
//! failure is logged at error level; there is no compensating call.
//!
//! The balance check and the debit are also not atomic with respect to other
//! transfers from the same account. Two concurrent attempts can both pass the
//! check against the same balance.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::api::sinpe::Gateway;
use crate::models::{Transaction, TransferRequest, TransferStage};
use crate::utils::SinpeError;

/// One transfer attempt. Runs once; retrying means building a new attempt.
#[derive(Debug)]
pub struct TransferAttempt {
    request: TransferRequest,
    stage: TransferStage,
}

impl TransferAttempt {
    pub fn new(request: TransferRequest) -> Self {
        Self {
            request,
            stage: TransferStage::Idle,
        }
    }

    pub fn stage(&self) -> TransferStage {
        self.stage
    }

    fn enter(&mut self, stage: TransferStage) {
        debug!("Transfer {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }

    fn fail(&mut self, err: SinpeError) -> SinpeError {
        self.enter(TransferStage::Failed(err.kind()));
        err
    }

    pub async fn run<G: Gateway + ?Sized>(&mut self, gateway: &G) -> Result<Transaction, SinpeError> {
        if self.stage != TransferStage::Idle {
            return Err(SinpeError::Validation(
                "This transfer attempt has already been used".to_string(),
            ));
        }

        self.enter(TransferStage::Validating);
        let amount = self.request.amount;
        if amount <= 0 {
            return Err(self.fail(SinpeError::Validation("Amount must be positive".to_string())));
        }

        self.enter(TransferStage::CheckingBalance);
        let sender_id = self.request.sender_id.clone();
        let user = match gateway.get_user(&sender_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Failed to fetch sender {}: {}", sender_id, e);
                return Err(self.fail(SinpeError::Lookup(e)));
            }
        };

        if user.amount < amount {
            info!(
                "Rejected transfer of {} from {}: balance is {}",
                amount, sender_id, user.amount
            );
            return Err(self.fail(SinpeError::InsufficientFunds {
                requested: amount,
                available: user.amount,
            }));
        }

        self.enter(TransferStage::DebitingAccount);
        let debited = user.with_amount(user.amount - amount);
        if let Err(e) = gateway.update_user(&sender_id, &debited).await {
            warn!("Failed to debit sender {}: {}", sender_id, e);
            return Err(self.fail(SinpeError::Update(e)));
        }

        self.enter(TransferStage::RecordingTransaction);
        let record = Transaction::new_transfer(
            amount,
            self.request.recipient.clone(),
            self.request.description.clone(),
            Utc::now(),
        );
        let created = match gateway.create_transaction(&record).await {
            Ok(created) => created,
            Err(e) => {
                error!(
                    "Sender {} was debited {} but the transaction record failed: {}",
                    sender_id, amount, e
                );
                return Err(self.fail(SinpeError::Creation(e)));
            }
        };

        self.enter(TransferStage::Succeeded);
        info!(
            "Transfer SUCCESS: {} to {} (transaction {})",
            amount,
            created.contact.full_name(),
            created.transaction_id
        );
        Ok(created)
    }
}

/// Run a fresh transfer attempt for `request`
pub async fn execute_send<G: Gateway + ?Sized>(
    gateway: &G,
    request: TransferRequest,
) -> Result<Transaction, SinpeError> {
    TransferAttempt::new(request).run(gateway).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactRef, SINPE_MOVIL_TYPE};
    use crate::test_support::{user, Call, RecordingGateway, TEST_USER_ID};
    use crate::utils::ErrorKind;

    fn request(amount: i64) -> TransferRequest {
        TransferRequest {
            sender_id: TEST_USER_ID.to_string(),
            recipient: ContactRef::new("Ana", "Lopez"),
            amount,
            description: "almuerzo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_happy_path_debits_then_records() {
        let gateway = RecordingGateway::new().with_user(user(5000));

        let created = execute_send(&gateway, request(2000)).await.unwrap();
        assert!(!created.transaction_id.is_empty());

        let calls = gateway.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], Call::GetUser(TEST_USER_ID.to_string()));
        assert_eq!(
            calls[1],
            Call::UpdateUser {
                user_id: TEST_USER_ID.to_string(),
                amount: 3000,
            }
        );
        match &calls[2] {
            Call::CreateTransaction(record) => {
                assert_eq!(record.amount, 2000);
                assert_eq!(record.contact, ContactRef::new("Ana", "Lopez"));
                assert_eq!(record.description, "almuerzo");
                assert_eq!(record.kind, SINPE_MOVIL_TYPE);
                assert_eq!(record.transaction_id, "");
            }
            other => panic!("expected transaction creation, got {:?}", other),
        }
        assert_eq!(gateway.current_user().unwrap().amount, 3000);
    }

    #[tokio::test]
    async fn test_insufficient_balance_writes_nothing() {
        let gateway = RecordingGateway::new().with_user(user(1000));
        let mut attempt = TransferAttempt::new(request(1500));

        let err = attempt.run(&gateway).await.unwrap_err();
        assert!(matches!(
            err,
            SinpeError::InsufficientFunds { requested: 1500, available: 1000 }
        ));
        assert_eq!(attempt.stage(), TransferStage::Failed(ErrorKind::InsufficientFunds));
        assert_eq!(gateway.calls(), vec![Call::GetUser(TEST_USER_ID.to_string())]);
    }

    #[tokio::test]
    async fn test_exact_balance_is_allowed() {
        let gateway = RecordingGateway::new().with_user(user(1000));
        execute_send(&gateway, request(1000)).await.unwrap();
        assert_eq!(gateway.current_user().unwrap().amount, 0);
    }

    #[tokio::test]
    async fn test_non_positive_amount_makes_no_calls() {
        for amount in [0, -500] {
            let gateway = RecordingGateway::new().with_user(user(5000));
            let mut attempt = TransferAttempt::new(request(amount));

            let err = attempt.run(&gateway).await.unwrap_err();
            assert!(matches!(err, SinpeError::Validation(_)));
            assert_eq!(attempt.stage(), TransferStage::Failed(ErrorKind::Validation));
            assert!(gateway.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_aborts() {
        let gateway = RecordingGateway::new().with_user(user(5000)).failing_get_user();

        let err = execute_send(&gateway, request(2000)).await.unwrap_err();
        assert!(matches!(err, SinpeError::Lookup(_)));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_update_failure_never_records() {
        let gateway = RecordingGateway::new().with_user(user(5000)).failing_update();
        let mut attempt = TransferAttempt::new(request(2000));

        let err = attempt.run(&gateway).await.unwrap_err();
        assert!(matches!(err, SinpeError::Update(_)));
        assert_eq!(attempt.stage(), TransferStage::Failed(ErrorKind::Update));
        assert!(!gateway
            .calls()
            .iter()
            .any(|c| matches!(c, Call::CreateTransaction(_))));
        assert_eq!(gateway.current_user().unwrap().amount, 5000);
    }

    #[tokio::test]
    async fn test_creation_failure_keeps_debit() {
        let gateway = RecordingGateway::new().with_user(user(5000)).failing_create();

        let err = execute_send(&gateway, request(2000)).await.unwrap_err();
        assert!(matches!(err, SinpeError::Creation(_)));
        assert_eq!(gateway.calls().len(), 3);
        assert_eq!(gateway.current_user().unwrap().amount, 3000);
    }

    #[tokio::test]
    async fn test_attempt_is_one_shot() {
        let gateway = RecordingGateway::new().with_user(user(5000));
        let mut attempt = TransferAttempt::new(request(2000));

        attempt.run(&gateway).await.unwrap();
        assert_eq!(attempt.stage(), TransferStage::Succeeded);

        let err = attempt.run(&gateway).await.unwrap_err();
        assert!(matches!(err, SinpeError::Validation(_)));
        assert_eq!(gateway.calls().len(), 3);
    }
}
