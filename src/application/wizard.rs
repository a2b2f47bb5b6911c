use super::dispatcher::StoreHandle;
use super::keypad::Keypad;
use crate::domain::action::{KeypadEvent, WizardAction};
use crate::domain::card::{Card, CardId};
use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{CardDirectoryBox, PaymentGatewayBox};
use crate::domain::session::{PaymentSession, Step, WizardCommand};
use crate::error::{Result, WizardError};

/// One-shot permission to submit, issued each time the wizard enters
/// the confirmation step.
#[derive(Debug)]
struct ConfirmationTicket {
    request: PaymentRequest,
}

/// Drives a [`PaymentSession`] through card selection, amount entry and
/// confirmation.
///
/// This is the layer the views talk to. It moves between steps only through
/// the store's guarded `Advance`/`Retreat` commands and makes sure a payment
/// is submitted at most once per entry into the confirmation step.
pub struct PaymentWizard {
    cards: CardDirectoryBox,
    gateway: PaymentGatewayBox,
    store: StoreHandle,
    keypad: Keypad,
    available: Option<Vec<Card>>,
    ticket: Option<ConfirmationTicket>,
}

impl PaymentWizard {
    pub fn new(
        cards: CardDirectoryBox,
        gateway: PaymentGatewayBox,
        store: StoreHandle,
        keypad: Keypad,
    ) -> Self {
        Self {
            cards,
            gateway,
            store,
            keypad,
            available: None,
            ticket: None,
        }
    }

    /// The most recently committed session.
    pub fn session(&self) -> PaymentSession {
        self.store.snapshot()
    }

    /// Cards offered for selection. The directory is queried only once per
    /// wizard; later calls return the cached list.
    pub async fn load_cards(&mut self) -> Result<&[Card]> {
        if self.available.is_none() {
            let cards = self.cards.list_cards().await?;
            tracing::info!(count = cards.len(), "loaded cards");
            self.available = Some(cards);
        }
        Ok(self.available.as_deref().unwrap_or_default())
    }

    pub async fn select_card(&mut self, card_id: CardId) -> Result<PaymentSession> {
        let card = self
            .load_cards()
            .await?
            .iter()
            .find(|card| card.id == card_id)
            .cloned()
            .ok_or(WizardError::UnknownCard(card_id))?;
        self.store.dispatch(WizardCommand::SelectCard(card)).await
    }

    /// Applies a keypad press. The keypad only exists on the amount step.
    pub async fn press(&self, event: KeypadEvent) -> Result<PaymentSession> {
        let session = self.store.current().await?;
        if session.step != Step::AmountEntry {
            return Err(WizardError::InvalidAction(format!(
                "keypad is not available on step {}",
                session.step
            )));
        }
        let update = self.keypad.update_for(event)?;
        self.store.dispatch(WizardCommand::SetAmount(update)).await
    }

    /// Moves forward one step if the current step is satisfied.
    ///
    /// The precondition is checked by the store when the step change
    /// commits, so updates queued from other handles cannot slip in between.
    /// Reaching the confirmation step submits the payment; the returned
    /// session reflects the outcome.
    pub async fn advance(&mut self) -> Result<PaymentSession> {
        let transition = self.store.dispatch_transition(WizardCommand::Advance).await?;
        if transition.after.step == transition.before.step {
            return Err(guard_error(
                &transition.before,
                transition.before.advance_blocker(),
            ));
        }

        let session = transition.after;
        if session.step == Step::Confirmation {
            self.issue_ticket(&session)?;
            return self.submit().await;
        }
        Ok(session)
    }

    /// Moves back from amount entry to card selection.
    pub async fn back(&mut self) -> Result<PaymentSession> {
        let transition = self.store.dispatch_transition(WizardCommand::Retreat).await?;
        if transition.after.step == transition.before.step {
            return Err(guard_error(
                &transition.before,
                transition.before.retreat_blocker(),
            ));
        }
        Ok(transition.after)
    }

    /// Submits the payment for the current confirmation entry.
    ///
    /// Without an unused ticket this is a no-op returning the current
    /// session, so repeated calls never charge twice.
    pub async fn submit(&mut self) -> Result<PaymentSession> {
        let Some(ticket) = self.ticket.take() else {
            tracing::debug!("payment already submitted for this confirmation");
            return self.store.current().await;
        };

        let request = ticket.request;
        tracing::info!(
            card_id = request.card_id,
            amount = %request.amount,
            idempotency_key = %request.idempotency_key,
            "submitting payment"
        );
        self.store.dispatch(WizardCommand::BeginSubmission).await?;

        match self.gateway.submit_payment(request).await {
            Ok(receipt) => {
                tracing::info!(idempotency_key = %receipt.idempotency_key, "payment approved");
                self.store.dispatch(WizardCommand::CompletePayment).await
            }
            Err(e) => {
                let reason = match e {
                    WizardError::PaymentFailed(reason) => reason,
                    other => other.to_string(),
                };
                tracing::error!(%reason, "payment failed");
                self.store
                    .dispatch(WizardCommand::FailPayment(reason.clone()))
                    .await?;
                Err(WizardError::PaymentFailed(reason))
            }
        }
    }

    /// Submits again after a failed attempt, under a new idempotency key.
    pub async fn retry(&mut self) -> Result<PaymentSession> {
        let session = self.store.current().await?;
        if session.step != Step::Confirmation || !session.is_failed() {
            return Err(WizardError::InvalidAction(
                "retry is only possible after a failed payment".to_string(),
            ));
        }
        self.issue_ticket(&session)?;
        self.submit().await
    }

    /// Returns to a fresh session. The loaded card list is kept.
    pub async fn reset(&mut self) -> Result<PaymentSession> {
        self.ticket = None;
        self.store.dispatch(WizardCommand::Reset).await
    }

    pub async fn perform(&mut self, action: WizardAction) -> Result<PaymentSession> {
        match action {
            WizardAction::SelectCard(id) => self.select_card(id).await,
            WizardAction::Key(event) => self.press(event).await,
            WizardAction::Next => self.advance().await,
            WizardAction::Prev => self.back().await,
            WizardAction::Retry => self.retry().await,
            WizardAction::Reset => self.reset().await,
        }
    }

    fn issue_ticket(&mut self, session: &PaymentSession) -> Result<()> {
        let card = session
            .selected_card
            .as_ref()
            .ok_or(WizardError::StepGuard {
                step: session.step,
                reason: "no card selected",
            })?;
        if session.amount.is_zero() {
            return Err(WizardError::StepGuard {
                step: session.step,
                reason: "amount is zero",
            });
        }
        tracing::info!(card = %card, amount = %session.amount, "entered confirmation");
        self.ticket = Some(ConfirmationTicket {
            request: PaymentRequest::new(card.id, session.amount),
        });
        Ok(())
    }
}

fn guard_error(session: &PaymentSession, reason: Option<&'static str>) -> WizardError {
    WizardError::StepGuard {
        step: session.step,
        reason: reason.unwrap_or("step did not change"),
    }
}
