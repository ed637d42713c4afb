//! GraphQL scalar helpers.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute of newtypes
/// wrapping domain values.
///
/// The scalar is represented as a string, produced by the [`Display`] impl
/// of `As` and parsed back with its [`FromStr`] impl, so the domain
/// validation applies to the GraphQL input as well.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Outputs the wrapped `As` value as a string scalar.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type from a string [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the input is not a string, or the string is rejected by the
    /// [`FromStr`] impl of `As`.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: From<As> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("scalar");
        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse `{name}` input scalar from non-string value: \
                 {input}",
            )
        })?;
        s.parse::<As>().map(T::from).map_err(|e| {
            format!("Cannot parse `{name}` input scalar from \"{s}\": {e}")
        })
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}
