use crate::domain::session::PaymentSession;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct SessionRow<'a> {
    step: u8,
    card: Option<u32>,
    amount: u64,
    loading: bool,
    complete: bool,
    failure: Option<&'a str>,
}

impl<'a> From<&'a PaymentSession> for SessionRow<'a> {
    fn from(session: &'a PaymentSession) -> Self {
        Self {
            step: session.step.number(),
            card: session.selected_card.as_ref().map(|card| card.id),
            amount: session.amount.value(),
            loading: session.is_loading,
            complete: session.is_complete,
            failure: session.failure.as_deref(),
        }
    }
}

/// Writes session snapshots as CSV rows with the header
/// `step,card,amount,loading,complete,failure`.
pub struct SessionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SessionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_session(&mut self, session: &PaymentSession) -> Result<()> {
        self.writer.serialize(SessionRow::from(session))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::Amount;
    use crate::domain::card::{Card, CardColor};
    use crate::domain::session::Step;

    fn render(sessions: &[PaymentSession]) -> String {
        let mut buffer = Vec::new();
        {
            let mut writer = SessionWriter::new(&mut buffer);
            for session in sessions {
                writer.write_session(session).unwrap();
            }
            writer.flush().unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_default_session_row() {
        let out = render(&[PaymentSession::default()]);
        assert_eq!(out, "step,card,amount,loading,complete,failure\n1,,0,false,false,\n");
    }

    #[test]
    fn test_completed_and_failed_rows() {
        let card = Card::new(3, "Premium", "**** 9999", CardColor::Purple, 0);
        let complete = PaymentSession {
            step: Step::Confirmation,
            selected_card: Some(card.clone()),
            amount: Amount::new(50_000),
            is_loading: false,
            is_complete: true,
            failure: None,
        };
        let failed = PaymentSession {
            is_complete: false,
            failure: Some("card declined".to_string()),
            ..complete.clone()
        };
        let out = render(&[complete, failed]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "3,3,50000,false,true,");
        assert_eq!(lines[2], "3,3,50000,false,false,card declined");
    }
}
