//! [`Date`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error, From, Into};
use time::{format_description::BorrowedFormatItem, macros::format_description};

/// Textual format of a [`Date`]: two-digit month, two-digit day and
/// four-digit year, separated with dashes (`01-04-2022`).
const FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month]-[day]-[year]");

/// Calendar date, without any time or time zone.
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar_date(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the number of whole days from this [`Date`] to the `other`
    /// one.
    ///
    /// The result is negative if the `other` [`Date`] precedes this one.
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    /// Shifts this [`Date`] by the provided number of `days`.
    ///
    /// [`None`] is returned if the resulting date is out of the supported
    /// range.
    #[must_use]
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        self.0.checked_add(time::Duration::days(days)).map(Self)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format(FORMAT).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, FORMAT).map(Self).map_err(ParseError)
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("expected `MM-DD-YYYY` date: {_0}")]
pub struct ParseError(time::error::Parse);

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in `MM-DD-YYYY` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = super::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Date;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_calendar_date(y, m, d).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(Date::from_str("01-04-2022").unwrap(), date(2022, 1, 4));
        assert_eq!(Date::from_str("02-14-2022").unwrap(), date(2022, 2, 14));
        assert_eq!(Date::from_str("12-31-1999").unwrap(), date(1999, 12, 31));

        assert!(Date::from_str("2022-01-04").is_err());
        assert!(Date::from_str("1-4-2022").is_err());
        assert!(Date::from_str("13-01-2022").is_err());
        assert!(Date::from_str("02-30-2022").is_err());
        assert!(Date::from_str("").is_err());
    }

    #[test]
    fn parse_error_names_format() {
        let err = Date::from_str("2022-01-04").unwrap_err();
        let copied = err;

        assert!(err.to_string().starts_with("expected `MM-DD-YYYY` date"));
        assert_eq!(copied.to_string(), err.to_string());
    }

    #[test]
    fn to_string() {
        assert_eq!(date(2022, 1, 4).to_string(), "01-04-2022");
        assert_eq!(date(2022, 12, 25).to_string(), "12-25-2022");
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(Date::from_calendar_date(2022, 0, 1).is_none());
        assert!(Date::from_calendar_date(2022, 2, 29).is_none());
        assert!(Date::from_calendar_date(2024, 2, 29).is_some());
    }

    #[test]
    fn days_until() {
        assert_eq!(date(2022, 1, 1).days_until(date(2022, 1, 10)), 9);
        assert_eq!(date(2022, 1, 1).days_until(date(2022, 2, 14)), 44);
        assert_eq!(date(2022, 1, 1).days_until(date(2022, 1, 1)), 0);
        assert_eq!(date(2022, 1, 10).days_until(date(2022, 1, 1)), -9);
    }

    #[test]
    fn checked_add_days() {
        assert_eq!(
            date(2022, 1, 30).checked_add_days(2),
            Some(date(2022, 2, 1)),
        );
        assert_eq!(
            date(2022, 3, 1).checked_add_days(-1),
            Some(date(2022, 2, 28)),
        );
    }
}
