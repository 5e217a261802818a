//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices are whole Rwandan francs; the franc has no minor unit in
//! everyday use so a `Price` normally carries an integral amount. Decimal
//! arithmetic only becomes fractional when a tax rate is applied, at which
//! point [`Price::round_half_up`] brings the value back to whole francs.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount of money in Rwandan francs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero francs.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a whole number of francs.
    #[must_use]
    pub fn from_rwf(francs: i64) -> Self {
        Self(Decimal::from(francs))
    }

    /// Create a price from a raw decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Round to the nearest whole franc, halves away from zero.
    ///
    /// This matches `Math.round` semantics for the non-negative amounts
    /// that occur in practice.
    #[must_use]
    pub fn round_half_up(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiply by a tax rate (e.g. `0.18`) and round to whole francs.
    #[must_use]
    pub fn tax_at(self, rate: Decimal) -> Self {
        Self(self.0 * rate).round_half_up()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, qty: u32) -> Self {
        Self(self.0 * Decimal::from(qty))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    /// Formats the whole-franc amount with thousands separators ("1,500").
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = self.round_half_up().0;
        let raw = rounded.trunc().to_string();
        let (sign, digits) = raw
            .strip_prefix('-')
            .map_or(("", raw.as_str()), |rest| ("-", rest));

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "{sign}{grouped}")
    }
}
