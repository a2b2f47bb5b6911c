use crate::config::{DigitMode, WizardConfig};
use crate::domain::action::KeypadEvent;
use crate::domain::amount::AmountUpdate;
use crate::error::{Result, WizardError};

/// Translates keypad presses into amount updates.
///
/// Every update is expressed relative to the amount at commit time, so a
/// burst of presses queued before the first one lands still adds up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    digit_mode: DigitMode,
    quick_amounts: Vec<u64>,
}

impl Keypad {
    pub fn new(digit_mode: DigitMode, quick_amounts: Vec<u64>) -> Self {
        Self {
            digit_mode,
            quick_amounts,
        }
    }

    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.digit_mode, config.quick_amounts.clone())
    }

    /// Fails only for keys this keypad does not have.
    pub fn update_for(&self, event: KeypadEvent) -> Result<AmountUpdate> {
        match event {
            KeypadEvent::Digit(d) if d <= 9 => {
                let d = u64::from(d);
                Ok(match self.digit_mode {
                    DigitMode::Additive => AmountUpdate::add(d),
                    DigitMode::Concatenate => {
                        AmountUpdate::apply_with(move |current| append_digit(current, d))
                    }
                })
            }
            KeypadEvent::Digit(d) => Err(WizardError::InvalidAction(format!(
                "{d} is not a keypad digit"
            ))),
            KeypadEvent::Quick(q) if self.quick_amounts.contains(&q) => Ok(AmountUpdate::add(q)),
            KeypadEvent::Quick(q) => Err(WizardError::InvalidAction(format!(
                "{q} is not a quick amount"
            ))),
            KeypadEvent::Backspace => Ok(AmountUpdate::apply_with(drop_last_digit)),
        }
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::from_config(&WizardConfig::default())
    }
}

/// Removes the last decimal digit: `1234` → `123`, `7` → `0`, `0` → `0`.
pub fn drop_last_digit(current: u64) -> u64 {
    let mut digits = current.to_string();
    digits.pop();
    if digits.is_empty() {
        digits.push('0');
    }
    digits.parse().unwrap_or(0)
}

fn append_digit(current: u64, digit: u64) -> u64 {
    current.saturating_mul(10).saturating_add(digit)
}
