use super::card::Card;
use super::payment::{PaymentReceipt, PaymentRequest};
use crate::error::Result;
use async_trait::async_trait;

/// Source of the cards a user may pay with.
#[async_trait]
pub trait CardDirectory: Send + Sync {
    /// Must be idempotent and free of side effects.
    async fn list_cards(&self) -> Result<Vec<Card>>;
}

/// Settles payments. A rejection is reported as `WizardError::PaymentFailed`.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit_payment(&self, request: PaymentRequest) -> Result<PaymentReceipt>;
}

pub type CardDirectoryBox = Box<dyn CardDirectory>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
