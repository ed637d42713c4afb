//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

use crate::Price;

/// Signed decimal percentage.
///
/// Negative values describe a discount, positive ones describe a surcharge.
/// A value can never go below `-100`, so applying it never flips the sign
/// of a [`Price`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `-100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= -Decimal::ONE_HUNDRED).then_some(Self(val))
    }

    /// Returns the raw [`Decimal`] value of this [`Percent`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Adjusts the provided [`Price`] by this [`Percent`]:
    /// `price + price × percent / 100`.
    ///
    /// No rounding is performed. Returns [`None`] if the adjusted amount
    /// overflows.
    #[must_use]
    pub fn apply(self, price: Price) -> Option<Price> {
        let amount = price.amount();
        amount
            .checked_mul(self.0)
            .and_then(|a| a.checked_div(Decimal::ONE_HUNDRED))
            .and_then(|a| a.checked_add(amount))
            .map(Price::new)
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("percent must be a decimal number not less than -100")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Signed decimal percentage, not less than `-100`.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Percent = super::Percent;

    impl Percent {
        fn to_output<S: ScalarValue>(p: &Percent) -> Value<S> {
            Value::scalar(p.0.normalize().to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Percent` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Percent` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{Percent, Price};

    #[test]
    fn rejects_below_minus_hundred() {
        assert!(Percent::new(dec!(-100)).is_some());
        assert!(Percent::new(dec!(-100.01)).is_none());
        assert!(Percent::new(dec!(250)).is_some());

        assert!(Percent::from_str("-10").is_ok());
        assert!(Percent::from_str("ten").is_err());
    }

    #[test]
    fn parse_error_states_lower_bound() {
        assert_eq!(
            Percent::from_str("-101").unwrap_err(),
            "percent must be a decimal number not less than -100",
        );
    }

    #[test]
    fn applies_discount() {
        let percent = Percent::new(dec!(-10)).unwrap();

        assert_eq!(
            percent.apply(Price::new(dec!(100))).unwrap().amount(),
            dec!(90),
        );
    }

    #[test]
    fn applies_surcharge() {
        let percent = Percent::new(dec!(10)).unwrap();

        assert_eq!(
            percent.apply(Price::new(dec!(36))).unwrap().amount(),
            dec!(39.6),
        );
    }

    #[test]
    fn does_not_round() {
        let percent = Percent::new(dec!(-9)).unwrap();

        assert_eq!(
            percent.apply(Price::new(dec!(15.55))).unwrap().amount(),
            dec!(14.1505),
        );
    }

    #[test]
    fn overflow_is_none() {
        let percent =
            Percent::new(Decimal::from_scientific("1e21").unwrap()).unwrap();

        assert_eq!(
            percent.apply(Price::new(Decimal::from(1_000_000_000_000_i64))),
            None,
        );
        assert_eq!(
            Percent::new(dec!(0)).unwrap().apply(Price::new(Decimal::MAX)),
            Some(Price::new(Decimal::MAX)),
        );
    }
}
