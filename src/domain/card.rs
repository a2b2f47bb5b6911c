use serde::{Deserialize, Serialize};
use std::fmt;

pub type CardId = u32;

/// Display tag of a card. Carries no behaviour beyond presentation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Blue,
    Black,
    Purple,
    #[serde(other)]
    Other,
}

/// A payment card offered by the card directory.
///
/// Cards are immutable once listed. `number` is a masked display string,
/// never a real PAN, and `balance` is informational only: it is not checked
/// against the amount being paid.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Card {
    /// Unique identifier within the directory.
    pub id: CardId,
    pub name: String,
    /// Masked number, e.g. `**** **** **** 1234`.
    pub number: String,
    pub color: CardColor,
    pub balance: u64,
}

impl Card {
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        number: impl Into<String>,
        color: CardColor,
        balance: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            number: number.into(),
            color,
            balance,
        }
    }

    /// Last four characters of the masked number.
    pub fn last_four(&self) -> &str {
        let start = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.number[start..]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.last_four())
    }
}
