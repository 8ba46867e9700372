use super::amount::Amount;
use super::navigation::TerminalRules;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "session is being torn down" flag.
///
/// The host sets it before destroying the surface; the interceptor reads it
/// synchronously on every navigation. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct TeardownSignal {
    finishing: Arc<AtomicBool>,
}

impl TeardownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) {
        self.finishing.store(true, Ordering::SeqCst);
    }

    pub fn is_finishing(&self) -> bool {
        self.finishing.load(Ordering::SeqCst)
    }
}

/// One payment attempt.
#[derive(Debug, Clone)]
pub struct Session {
    pub order_id: String,
    pub amount: Amount,
    pub currency: String,
    pub rules: TerminalRules,
    teardown: TeardownSignal,
}

impl Session {
    pub fn new(
        order_id: impl Into<String>,
        amount: Amount,
        currency: impl Into<String>,
        rules: TerminalRules,
        teardown: TeardownSignal,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            currency: currency.into(),
            rules,
            teardown,
        }
    }

    pub fn success_url(&self) -> &str {
        self.rules.success_url()
    }

    pub fn fail_url(&self) -> &str {
        self.rules.fail_url()
    }

    pub fn is_finishing(&self) -> bool {
        self.teardown.is_finishing()
    }

    pub fn teardown_signal(&self) -> &TeardownSignal {
        &self.teardown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_teardown_is_shared_between_clones() {
        let signal = TeardownSignal::new();
        let session = Session::new(
            "1",
            Amount::new(dec!(1)),
            "RUB",
            TerminalRules::new("https://app/ok", ""),
            signal.clone(),
        );

        assert!(!session.is_finishing());
        signal.begin();
        assert!(session.is_finishing());
        assert_eq!(session.success_url(), "https://app/ok");
        assert_eq!(session.fail_url(), "");
    }
}
