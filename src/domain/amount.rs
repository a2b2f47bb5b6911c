use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest amount the wizard will ever hold.
pub const CLAMP_MAX: u64 = 9_999_999_999;

/// Amount being paid, in whole currency units.
///
/// Always within `0..=CLAMP_MAX`; every constructor clamps, so a value read
/// back from an `Amount` never exceeds the ceiling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "u64", into = "u64")]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(CLAMP_MAX);

    pub fn new(value: u64) -> Self {
        Self(value.min(CLAMP_MAX))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Formats with thousands separators, e.g. `1,050,000`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        f.write_str(&grouped)
    }
}

/// A change to the session amount.
///
/// `Apply` is evaluated against the amount current when the update is
/// committed, not when it was created, so queued updates compose.
pub enum AmountUpdate {
    Set(u64),
    Apply(Box<dyn FnOnce(u64) -> u64 + Send>),
}

impl AmountUpdate {
    pub fn apply_with<F>(f: F) -> Self
    where
        F: FnOnce(u64) -> u64 + Send + 'static,
    {
        Self::Apply(Box::new(f))
    }

    /// Adds `delta` to whatever the amount is at commit time.
    pub fn add(delta: u64) -> Self {
        Self::apply_with(move |current| current.saturating_add(delta))
    }

    /// Resolves the update against `current` and clamps the result.
    pub fn resolve(self, current: Amount) -> Amount {
        let raw = match self {
            Self::Set(value) => value,
            Self::Apply(f) => f(current.value()),
        };
        Amount::new(raw)
    }
}

impl From<u64> for AmountUpdate {
    fn from(value: u64) -> Self {
        Self::Set(value)
    }
}

impl fmt::Debug for AmountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Self::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_clamps_on_construction() {
        assert_eq!(Amount::new(CLAMP_MAX + 1), Amount::MAX);
        assert_eq!(Amount::new(u64::MAX).value(), CLAMP_MAX);
        assert_eq!(Amount::new(42).value(), 42);
    }

    #[test]
    fn test_amount_display_grouping() {
        assert_eq!(Amount::ZERO.to_string(), "0");
        assert_eq!(Amount::new(999).to_string(), "999");
        assert_eq!(Amount::new(1000).to_string(), "1,000");
        assert_eq!(Amount::new(50000).to_string(), "50,000");
        assert_eq!(Amount::MAX.to_string(), "9,999,999,999");
    }

    #[test]
    fn test_update_resolution() {
        assert_eq!(AmountUpdate::Set(7).resolve(Amount::new(100)), Amount::new(7));
        assert_eq!(AmountUpdate::add(5).resolve(Amount::new(100)), Amount::new(105));
        assert_eq!(
            AmountUpdate::apply_with(|v| v * 2).resolve(Amount::new(21)),
            Amount::new(42)
        );
    }

    #[test]
    fn test_update_clamps_and_saturates() {
        assert_eq!(AmountUpdate::Set(u64::MAX).resolve(Amount::ZERO), Amount::MAX);
        assert_eq!(AmountUpdate::add(u64::MAX).resolve(Amount::MAX), Amount::MAX);
        assert_eq!(
            AmountUpdate::add(10_000).resolve(Amount::new(9_999_999_995)),
            Amount::MAX
        );
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let json = serde_json::to_string(&Amount::new(50000)).unwrap();
        assert_eq!(json, "50000");
        let back: Amount = serde_json::from_str("99999999999").unwrap();
        assert_eq!(back, Amount::MAX);
    }
}
