use super::amount::Amount;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Sentinel selecting every payment method the provider offers.
pub const ALL_METHODS: &str = "all";

/// Which payment methods the hosted form should offer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    All,
    /// A single method by its provider name, e.g. `plastic` for cards.
    Specific(String),
}

impl PaymentMethod {
    /// Parses a caller-supplied method name. `all` (any case) and the empty
    /// string select every method.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_METHODS) {
            Self::All
        } else {
            Self::Specific(trimmed.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::All => ALL_METHODS,
            Self::Specific(name) => name,
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Call parameters for one payment form.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Generated when absent or empty.
    pub order_id: Option<String>,
    pub amount: Amount,
    pub currency: String,
    pub method: PaymentMethod,
}

impl PaymentRequest {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            order_id: None,
            amount: Amount::new(amount),
            currency: currency.into(),
            method: PaymentMethod::All,
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }
}
