use crate::domain::action::{KeypadEvent, WizardAction};
use crate::error::{Result, WizardError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum ActionKind {
    Select,
    Digit,
    Quick,
    Backspace,
    Next,
    Prev,
    Retry,
    Reset,
}

#[derive(Debug, Deserialize)]
struct ActionRecord {
    action: ActionKind,
    value: Option<u64>,
}

impl TryFrom<ActionRecord> for WizardAction {
    type Error = WizardError;

    fn try_from(record: ActionRecord) -> Result<Self> {
        let value = |what: &str| {
            record
                .value
                .ok_or_else(|| WizardError::InvalidAction(format!("{what} needs a value")))
        };
        Ok(match record.action {
            ActionKind::Select => {
                let id = value("select")?;
                let id = u32::try_from(id)
                    .map_err(|_| WizardError::InvalidAction(format!("card id {id} out of range")))?;
                WizardAction::SelectCard(id)
            }
            ActionKind::Digit => {
                let digit = value("digit")?;
                let digit = u8::try_from(digit)
                    .ok()
                    .filter(|d| *d <= 9)
                    .ok_or_else(|| WizardError::InvalidAction(format!("{digit} is not a digit")))?;
                WizardAction::Key(KeypadEvent::Digit(digit))
            }
            ActionKind::Quick => WizardAction::Key(KeypadEvent::Quick(value("quick")?)),
            ActionKind::Backspace => WizardAction::Key(KeypadEvent::Backspace),
            ActionKind::Next => WizardAction::Next,
            ActionKind::Prev => WizardAction::Prev,
            ActionKind::Retry => WizardAction::Retry,
            ActionKind::Reset => WizardAction::Reset,
        })
    }
}

/// Reads a scripted sequence of wizard actions from CSV.
///
/// The header is `action,value`; `value` may be left empty for actions that
/// take none. Whitespace is trimmed and short rows are accepted.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one result per row. A bad row does not end the stream.
    pub fn actions(self) -> impl Iterator<Item = Result<WizardAction>> {
        self.reader
            .into_deserialize::<ActionRecord>()
            .map(|result| result.map_err(WizardError::from).and_then(WizardAction::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "action, value\nselect, 1\nnext,\ndigit, 5\nquick, 10000\nbackspace\nprev\nretry\nreset";
        let reader = ActionReader::new(data.as_bytes());
        let actions: Vec<WizardAction> = reader.actions().map(|a| a.unwrap()).collect();

        assert_eq!(
            actions,
            vec![
                WizardAction::SelectCard(1),
                WizardAction::Next,
                WizardAction::Key(KeypadEvent::Digit(5)),
                WizardAction::Key(KeypadEvent::Quick(10_000)),
                WizardAction::Key(KeypadEvent::Backspace),
                WizardAction::Prev,
                WizardAction::Retry,
                WizardAction::Reset,
            ]
        );
    }

    #[test]
    fn test_reader_malformed_lines() {
        let data = "action, value\ndance, 1\nselect,\ndigit, 12\nquick, lots\nnext,";
        let reader = ActionReader::new(data.as_bytes());
        let results: Vec<Result<WizardAction>> = reader.actions().collect();

        assert_eq!(results.len(), 5);
        assert!(matches!(results[0], Err(WizardError::CsvError(_))));
        assert!(matches!(results[1], Err(WizardError::InvalidAction(_))));
        assert!(matches!(results[2], Err(WizardError::InvalidAction(_))));
        assert!(matches!(results[3], Err(WizardError::CsvError(_))));
        assert!(matches!(results[4], Ok(WizardAction::Next)));
    }
}
