//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

/// Exact decimal amount of money.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Zero [`Price`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Number of decimal places a [`Price`] is [rounded][Self::round] to.
    pub const SCALE: u32 = 2;

    /// Creates a new [`Price`] of the provided `amount`.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Price`] is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Indicates whether this [`Price`] is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Adds the provided [`Price`] to this one.
    ///
    /// Returns [`None`] if the sum overflows.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiplies this [`Price`] by the provided number of `days`.
    ///
    /// Returns [`None`] if the product overflows.
    #[must_use]
    pub fn checked_mul(self, days: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(days)).map(Self)
    }

    /// Rounds this [`Price`] to [`Price::SCALE`] decimal places, with
    /// midpoints rounded away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        Self(
            self.0.round_dp_with_strategy(
                Self::SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            ),
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Self)
            .map_err(|_| "invalid price amount")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Decimal amount of money in `{major}.{minor}` format, where `minor` is
    /// optional.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Price = super::Price;

    impl Price {
        fn to_output<S: ScalarValue>(p: &Price) -> Value<S> {
            Value::scalar(p.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Price` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Price` input scalar: {e}")
                    })
                })
        }
    }
}
