use crate::domain::card::CardId;
use crate::domain::session::Step;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WizardError>;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    ConfigError(String),
    #[error("Cannot leave step {step}: {reason}")]
    StepGuard { step: Step, reason: &'static str },
    #[error("Unknown card: {0}")]
    UnknownCard(CardId),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error("Wizard store is closed")]
    StoreClosed,
}
