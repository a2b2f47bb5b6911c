use crate::domain::amount::CLAMP_MAX;
use crate::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// How a digit key changes the amount.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigitMode {
    /// The digit's value is added to the amount: `5`, `3` gives 8.
    #[default]
    Additive,
    /// The digit is appended in decimal: `5`, `3` gives 53.
    Concatenate,
}

/// Wizard settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct WizardConfig {
    pub digit_mode: DigitMode,
    /// Quick-amount buttons, in display order.
    pub quick_amounts: Vec<u64>,
    /// Simulated latency of the card directory.
    pub card_list_latency_ms: u64,
    /// Simulated latency of the payment gateway.
    pub payment_latency_ms: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            digit_mode: DigitMode::Additive,
            quick_amounts: vec![10_000, 50_000, 100_000, 500_000],
            card_list_latency_ms: 2_000,
            payment_latency_ms: 3_000,
        }
    }
}

impl WizardConfig {
    /// Loads and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.quick_amounts.is_empty() {
            return Err(WizardError::ConfigError(
                "quick_amounts must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .quick_amounts
            .iter()
            .find(|&&q| q == 0 || q > CLAMP_MAX)
        {
            return Err(WizardError::ConfigError(format!(
                "quick amount {bad} is outside 1..={CLAMP_MAX}"
            )));
        }
        Ok(())
    }

    /// Drops all simulated latency.
    pub fn without_delays(mut self) -> Self {
        self.card_list_latency_ms = 0;
        self.payment_latency_ms = 0;
        self
    }

    pub fn card_list_latency(&self) -> Duration {
        Duration::from_millis(self.card_list_latency_ms)
    }

    pub fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.payment_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config = WizardConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, WizardConfig::default());
        assert_eq!(config.payment_latency(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"digit_mode": "concatenate", "payment_latency_ms": 10}"#;
        let config = WizardConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.digit_mode, DigitMode::Concatenate);
        assert_eq!(config.payment_latency_ms, 10);
        assert_eq!(config.quick_amounts, vec![10_000, 50_000, 100_000, 500_000]);
    }

    #[test]
    fn test_rejects_bad_quick_amounts() {
        let empty = r#"{"quick_amounts": []}"#;
        assert!(matches!(
            WizardConfig::from_reader(empty.as_bytes()),
            Err(WizardError::ConfigError(_))
        ));

        let zero = r#"{"quick_amounts": [0, 1000]}"#;
        assert!(matches!(
            WizardConfig::from_reader(zero.as_bytes()),
            Err(WizardError::ConfigError(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{"digit_mod": "additive"}"#;
        assert!(matches!(
            WizardConfig::from_reader(json.as_bytes()),
            Err(WizardError::ConfigParseError(_))
        ));
    }

    #[test]
    fn test_without_delays() {
        let config = WizardConfig::default().without_delays();
        assert_eq!(config.card_list_latency(), Duration::ZERO);
        assert_eq!(config.payment_latency(), Duration::ZERO);
    }
}
