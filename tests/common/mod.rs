#![allow(dead_code)]

use payform::domain::config::{self, ConfigMap};
use payform::domain::navigation::PaymentOutcome;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

pub const DEMO_URL: &str = "https://demo.moneta.ru";
pub const PRODUCTION_URL: &str = "https://www.payanyway.ru";

pub fn base_config() -> ConfigMap {
    [
        (config::KEY_ACCOUNT_ID, "12345678"),
        (config::KEY_TEST_MODE, "0"),
        (config::KEY_DEMO_URL, DEMO_URL),
        (config::KEY_PRODUCTION_URL, PRODUCTION_URL),
        (config::KEY_WIDGET_LINK, "/assistant.widget"),
    ]
    .into_iter()
    .collect()
}

/// Writes `key=value` lines to a temporary properties file.
pub fn write_properties(entries: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for (key, value) in entries {
        writeln!(file, "{} = \"{}\"", key, value).unwrap();
    }
    file.flush().unwrap();
    file
}

/// Collects every outcome the host is notified of.
#[derive(Clone, Default)]
pub struct OutcomeLog(Arc<Mutex<Vec<PaymentOutcome>>>);

impl OutcomeLog {
    pub fn callback(&self) -> impl FnOnce(PaymentOutcome) + Send + 'static {
        let log = self.0.clone();
        move |outcome| log.lock().unwrap().push(outcome)
    }

    pub fn outcomes(&self) -> Vec<PaymentOutcome> {
        self.0.lock().unwrap().clone()
    }
}
