use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::io::Read;

/// One recorded navigation attempt.
///
/// Columns: `url` (empty means the surface reported no URL), `main_frame`
/// (default `true`), `finishing` (default `false`; once a row sets it the
/// replayed session stays in teardown).
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct NavigationAttempt {
    pub url: Option<String>,
    #[serde(default)]
    pub main_frame: Option<bool>,
    #[serde(default)]
    pub finishing: Option<bool>,
}

impl NavigationAttempt {
    pub fn is_main_frame(&self) -> bool {
        self.main_frame.unwrap_or(true)
    }

    pub fn is_finishing(&self) -> bool {
        self.finishing.unwrap_or(false)
    }
}

/// Reads navigation traces from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<NavigationAttempt>`. Whitespace is trimmed and short rows are
/// accepted.
pub struct TraceReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TraceReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes attempts, one per row.
    pub fn attempts(self) -> impl Iterator<Item = Result<NavigationAttempt>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
