use crate::domain::navigation::{NavigationDecision, PaymentOutcome};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One replayed navigation and what the interceptor decided.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct DecisionRecord {
    pub url: String,
    pub decision: &'static str,
    pub outcome: Option<PaymentOutcome>,
}

impl DecisionRecord {
    pub fn new(url: Option<&str>, decision: NavigationDecision) -> Self {
        Self {
            url: url.unwrap_or_default().to_string(),
            decision: decision.label(),
            outcome: decision.outcome(),
        }
    }
}

/// Writes decision records as CSV with a `url,decision,outcome` header.
pub struct DecisionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> DecisionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = DecisionRecord>,
    {
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes decision records as JSON, one object per line.
pub fn write_json_lines<W, I>(mut sink: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = DecisionRecord>,
{
    for record in records {
        serde_json::to_writer(&mut sink, &record)?;
        sink.write_all(b"\n")?;
    }
    sink.flush()?;
    Ok(())
}
