use super::amount::Amount;
use super::card::CardId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request to charge `amount` to card `card_id`.
///
/// `idempotency_key` is fresh for every submission attempt so a gateway can
/// discard duplicates of the same attempt.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PaymentRequest {
    pub card_id: CardId,
    pub amount: Amount,
    pub idempotency_key: Uuid,
}

impl PaymentRequest {
    pub fn new(card_id: CardId, amount: Amount) -> Self {
        Self {
            card_id,
            amount,
            idempotency_key: Uuid::new_v4(),
        }
    }
}

/// Gateway acknowledgement of an approved request.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PaymentReceipt {
    pub card_id: CardId,
    pub amount: Amount,
    pub idempotency_key: Uuid,
}

impl From<&PaymentRequest> for PaymentReceipt {
    fn from(request: &PaymentRequest) -> Self {
        Self {
            card_id: request.card_id,
            amount: request.amount,
            idempotency_key: request.idempotency_key,
        }
    }
}
