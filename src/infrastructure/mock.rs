use crate::domain::card::{Card, CardColor};
use crate::domain::payment::{PaymentReceipt, PaymentRequest};
use crate::domain::ports::{CardDirectory, PaymentGateway};
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// The cards every demo user owns.
pub fn demo_cards() -> Vec<Card> {
    vec![
        Card::new(1, "Toss Bank Card", "**** **** **** 1234", CardColor::Blue, 1_500_000),
        Card::new(2, "Toss Check Card", "**** **** **** 5678", CardColor::Black, 800_000),
        Card::new(3, "Toss Premium", "**** **** **** 9999", CardColor::Purple, 2_500_000),
    ]
}

/// A card directory answering from a fixed list after a simulated delay.
#[derive(Debug, Clone)]
pub struct MockCardDirectory {
    cards: Vec<Card>,
    latency: Duration,
}

impl MockCardDirectory {
    /// Serves [`demo_cards`].
    pub fn new(latency: Duration) -> Self {
        Self::with_cards(demo_cards(), latency)
    }

    pub fn with_cards(cards: Vec<Card>, latency: Duration) -> Self {
        Self { cards, latency }
    }
}

#[async_trait]
impl CardDirectory for MockCardDirectory {
    async fn list_cards(&self) -> Result<Vec<Card>> {
        tokio::time::sleep(self.latency).await;
        Ok(self.cards.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Approve,
    Reject(String),
    /// Reject the first `n` attempts, approve the rest.
    RejectFirst(usize, String),
}

/// A payment gateway that settles nothing.
///
/// Every request is recorded so callers can inspect what would have been
/// charged. Clones share the same record.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    outcome: Outcome,
    latency: Duration,
    submitted: Arc<RwLock<Vec<PaymentRequest>>>,
}

impl MockPaymentGateway {
    fn with_outcome(outcome: Outcome, latency: Duration) -> Self {
        Self {
            outcome,
            latency,
            submitted: Arc::default(),
        }
    }

    pub fn approving(latency: Duration) -> Self {
        Self::with_outcome(Outcome::Approve, latency)
    }

    pub fn rejecting(reason: impl Into<String>, latency: Duration) -> Self {
        Self::with_outcome(Outcome::Reject(reason.into()), latency)
    }

    pub fn rejecting_first(attempts: usize, reason: impl Into<String>, latency: Duration) -> Self {
        Self::with_outcome(Outcome::RejectFirst(attempts, reason.into()), latency)
    }

    /// Every request received so far, oldest first.
    pub async fn submitted(&self) -> Vec<PaymentRequest> {
        self.submitted.read().await.clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn submit_payment(&self, request: PaymentRequest) -> Result<PaymentReceipt> {
        tracing::info!(
            card_id = request.card_id,
            amount = %request.amount,
            "mock gateway charging card"
        );
        let attempt = {
            let mut submitted = self.submitted.write().await;
            submitted.push(request.clone());
            submitted.len()
        };

        tokio::time::sleep(self.latency).await;

        match &self.outcome {
            Outcome::Approve => Ok(PaymentReceipt::from(&request)),
            Outcome::RejectFirst(n, _) if attempt > *n => Ok(PaymentReceipt::from(&request)),
            Outcome::Reject(reason) | Outcome::RejectFirst(_, reason) => {
                Err(WizardError::PaymentFailed(reason.clone()))
            }
        }
    }
}
