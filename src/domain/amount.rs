use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional digits the provider expects in `MNT_AMOUNT`.
pub const AMOUNT_SCALE: u32 = 2;

/// Monetary amount of a payment attempt.
///
/// This is a wrapper around `rust_decimal::Decimal`. The crate does not judge
/// whether an amount makes sense for the provider; it only renders it in the
/// fixed wire format.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Renders the amount with exactly two fractional digits and `.` as the
    /// separator, rounding half away from zero.
    pub fn to_wire(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(AMOUNT_SCALE);
        rounded.to_string()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}
