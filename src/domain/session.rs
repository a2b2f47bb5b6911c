use super::amount::{Amount, AmountUpdate};
use super::card::Card;
use crate::error::WizardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The wizard step currently shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Step {
    #[default]
    CardSelection = 1,
    AmountEntry = 2,
    Confirmation = 3,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// The following step. `Confirmation` has no successor and stays put.
    pub fn next(self) -> Self {
        match self {
            Self::CardSelection => Self::AmountEntry,
            Self::AmountEntry | Self::Confirmation => Self::Confirmation,
        }
    }

    /// The preceding step. `CardSelection` has no predecessor and stays put.
    pub fn prev(self) -> Self {
        match self {
            Self::CardSelection | Self::AmountEntry => Self::CardSelection,
            Self::Confirmation => Self::AmountEntry,
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for Step {
    type Error = WizardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::CardSelection),
            2 => Ok(Self::AmountEntry),
            3 => Ok(Self::Confirmation),
            other => Err(WizardError::InvalidAction(format!("no such step: {other}"))),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The in-progress payment.
///
/// A session is only ever replaced wholesale by [`reduce`]; readers never
/// observe a half-applied command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentSession {
    pub step: Step,
    pub selected_card: Option<Card>,
    pub amount: Amount,
    /// A submission is outstanding.
    pub is_loading: bool,
    /// The submission succeeded.
    pub is_complete: bool,
    /// Rejection reason of the last submission attempt.
    pub failure: Option<String>,
}

impl PaymentSession {
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Why the wizard may not move forward from here, if it may not.
    pub fn advance_blocker(&self) -> Option<&'static str> {
        match self.step {
            Step::CardSelection if self.selected_card.is_none() => Some("no card selected"),
            Step::AmountEntry if self.amount.is_zero() => Some("amount is zero"),
            Step::Confirmation => Some("confirmation is the last step"),
            _ => None,
        }
    }

    /// Why the wizard may not move back from here, if it may not.
    pub fn retreat_blocker(&self) -> Option<&'static str> {
        match self.step {
            Step::AmountEntry => None,
            _ => Some("no way back from this step"),
        }
    }
}

/// Every way a session can change.
#[derive(Debug)]
pub enum WizardCommand {
    SelectCard(Card),
    SetAmount(AmountUpdate),
    NextStep,
    PrevStep,
    /// `NextStep`, applied only if the step's precondition holds at commit.
    Advance,
    /// `PrevStep`, applied only from amount entry.
    Retreat,
    BeginSubmission,
    CompletePayment,
    FailPayment(String),
    Reset,
}

/// Applies `command` to `session`, producing the next session.
///
/// Total: every command is accepted in every state. `NextStep` and
/// `PrevStep` move unconditionally; `Advance` and `Retreat` leave the session
/// untouched when the step's precondition does not hold.
pub fn reduce(session: PaymentSession, command: WizardCommand) -> PaymentSession {
    match command {
        WizardCommand::SelectCard(card) => PaymentSession {
            selected_card: Some(card),
            ..session
        },
        WizardCommand::SetAmount(update) => PaymentSession {
            amount: update.resolve(session.amount),
            ..session
        },
        WizardCommand::NextStep => PaymentSession {
            step: session.step.next(),
            ..session
        },
        WizardCommand::PrevStep => PaymentSession {
            step: session.step.prev(),
            ..session
        },
        WizardCommand::Advance if session.advance_blocker().is_none() => PaymentSession {
            step: session.step.next(),
            ..session
        },
        WizardCommand::Retreat if session.retreat_blocker().is_none() => PaymentSession {
            step: session.step.prev(),
            ..session
        },
        WizardCommand::Advance | WizardCommand::Retreat => session,
        WizardCommand::BeginSubmission => PaymentSession {
            is_loading: true,
            failure: None,
            ..session
        },
        WizardCommand::CompletePayment => PaymentSession {
            is_complete: true,
            is_loading: false,
            step: Step::Confirmation,
            ..session
        },
        WizardCommand::FailPayment(reason) => PaymentSession {
            is_loading: false,
            failure: Some(reason),
            ..session
        },
        WizardCommand::Reset => PaymentSession::default(),
    }
}
