use crate::domain::amount::AmountUpdate;
use crate::domain::card::Card;
use crate::domain::session::{PaymentSession, WizardCommand, reduce};

/// Owner of the wizard's single [`PaymentSession`].
///
/// The methods here are the only mutators of the session. None of them can
/// fail and none of them check step preconditions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WizardStore {
    session: PaymentSession,
}

impl WizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &PaymentSession {
        &self.session
    }

    /// Applies `command` and returns the committed session.
    pub fn dispatch(&mut self, command: WizardCommand) -> &PaymentSession {
        tracing::debug!(?command, "applying wizard command");
        let current = std::mem::take(&mut self.session);
        self.session = reduce(current, command);
        &self.session
    }

    pub fn select_card(&mut self, card: Card) -> &PaymentSession {
        self.dispatch(WizardCommand::SelectCard(card))
    }

    pub fn set_amount(&mut self, update: impl Into<AmountUpdate>) -> &PaymentSession {
        self.dispatch(WizardCommand::SetAmount(update.into()))
    }

    pub fn next_step(&mut self) -> &PaymentSession {
        self.dispatch(WizardCommand::NextStep)
    }

    pub fn prev_step(&mut self) -> &PaymentSession {
        self.dispatch(WizardCommand::PrevStep)
    }

    pub fn begin_submission(&mut self) -> &PaymentSession {
        self.dispatch(WizardCommand::BeginSubmission)
    }

    pub fn complete_payment(&mut self) -> &PaymentSession {
        self.dispatch(WizardCommand::CompletePayment)
    }

    pub fn fail_payment(&mut self, reason: impl Into<String>) -> &PaymentSession {
        self.dispatch(WizardCommand::FailPayment(reason.into()))
    }

    pub fn reset(&mut self) -> &PaymentSession {
        self.dispatch(WizardCommand::Reset)
    }
}
