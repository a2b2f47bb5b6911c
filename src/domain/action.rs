use super::card::CardId;

/// A single press on the amount-entry keypad.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum KeypadEvent {
    /// A digit key, `0..=9`.
    Digit(u8),
    /// A preset quick-amount button.
    Quick(u64),
    Backspace,
}

/// A user interaction with the wizard, as the views would dispatch it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WizardAction {
    SelectCard(CardId),
    Key(KeypadEvent),
    Next,
    Prev,
    Retry,
    Reset,
}
