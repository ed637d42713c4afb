//! GraphQL [`Mutation`]s definitions.

use common::{Date, Percent, Price};
use juniper::graphql_object;
use service::{
    command,
    domain::{booking::StayLength, pricing_rule::Terms},
    Command as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Property` with the provided name and daily base price.
    #[tracing::instrument(
        skip_all,
        fields(
            base_price = %base_price,
            gql.name = "createProperty",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_property(
        name: api::property::Name,
        base_price: Price,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::CreateProperty {
                name: name.into(),
                base_price,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the name and/or the daily base price of the `Property`.
    ///
    /// Existing `Booking`s of the `Property` are not affected.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            base_price = ?base_price.map(|p| p.to_string()),
            gql.name = "updateProperty",
            id = %id,
            name = ?name.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_property(
        id: api::property::Id,
        name: Option<api::property::Name>,
        base_price: Option<Price>,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::UpdateProperty {
                property_id: id.into(),
                name: name.map(Into::into),
                base_price,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Property` along with its `PricingRule`s and `Booking`s.
    ///
    /// Returns the deleted `Property`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteProperty",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::DeleteProperty {
                property_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `PricingRule` of the `Property`.
    ///
    /// A threshold rule needs both `minStayLength` and `priceModifier`, a
    /// specific-day rule needs both `specificDay` and `fixedPrice`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            fixed_price = ?fixed_price.map(|p| p.to_string()),
            gql.name = "createPricingRule",
            min_stay_length = ?min_stay_length,
            otel.name = Self::SPAN_NAME,
            price_modifier = ?price_modifier.map(|p| p.to_string()),
            property_id = %property_id,
            specific_day = ?specific_day.map(|d| d.to_string()),
        ),
    )]
    pub async fn create_pricing_rule(
        property_id: api::property::Id,
        min_stay_length: Option<i32>,
        price_modifier: Option<Percent>,
        specific_day: Option<Date>,
        fixed_price: Option<Price>,
        ctx: &Context,
    ) -> Result<api::PricingRule, Error> {
        ctx.service()
            .execute(command::CreatePricingRule {
                property_id: property_id.into(),
                terms: Terms {
                    min_stay_length: min_stay_length
                        .map(|l| StayLength::new(l.into())),
                    price_modifier,
                    specific_day,
                    fixed_price,
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replaces all the fields of the `PricingRule` with the provided ones.
    ///
    /// Existing `Booking`s are not affected.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PRICING_RULE_NOT_EXISTS` - the `PricingRule` with the specified ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            fixed_price = ?fixed_price.map(|p| p.to_string()),
            gql.name = "updatePricingRule",
            id = %id,
            min_stay_length = ?min_stay_length,
            otel.name = Self::SPAN_NAME,
            price_modifier = ?price_modifier.map(|p| p.to_string()),
            specific_day = ?specific_day.map(|d| d.to_string()),
        ),
    )]
    pub async fn update_pricing_rule(
        id: api::pricing_rule::Id,
        min_stay_length: Option<i32>,
        price_modifier: Option<Percent>,
        specific_day: Option<Date>,
        fixed_price: Option<Price>,
        ctx: &Context,
    ) -> Result<api::PricingRule, Error> {
        ctx.service()
            .execute(command::UpdatePricingRule {
                rule_id: id.into(),
                terms: Terms {
                    min_stay_length: min_stay_length
                        .map(|l| StayLength::new(l.into())),
                    price_modifier,
                    specific_day,
                    fixed_price,
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `PricingRule`.
    ///
    /// Returns the deleted `PricingRule`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PRICING_RULE_NOT_EXISTS` - the `PricingRule` with the specified ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deletePricingRule",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_pricing_rule(
        id: api::pricing_rule::Id,
        ctx: &Context,
    ) -> Result<api::PricingRule, Error> {
        ctx.service()
            .execute(command::DeletePricingRule { rule_id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Books the `Property` from `startDate` to `endDate`, both included.
    ///
    /// The stay length and the final price are calculated out of the current
    /// base price and `PricingRule`s of the `Property`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist;
    /// - `INVALID_DATE_RANGE` - `endDate` precedes `startDate`;
    /// - `PRICE_OVERFLOW` - the final price of the stay is too large to be
    ///                      represented.
    #[tracing::instrument(
        skip_all,
        fields(
            end_date = %end_date,
            gql.name = "createBooking",
            otel.name = Self::SPAN_NAME,
            property_id = %property_id,
            start_date = %start_date,
        ),
    )]
    pub async fn create_booking(
        property_id: api::property::Id,
        start_date: Date,
        end_date: Date,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(command::CreateBooking {
                property_id: property_id.into(),
                start_date,
                end_date,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Booking`.
    ///
    /// Returns the deleted `Booking`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteBooking",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_booking(
        id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(command::DeleteBooking {
                booking_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(api::query::PropertyError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(api::query::PropertyError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_pricing_rule::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(api::query::PropertyError::NotExists.into())
            }
        }
    }
}

impl AsError for command::update_pricing_rule::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PricingRuleNotExists(_) => {
                Some(api::query::PricingRuleError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_pricing_rule::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PricingRuleNotExists(_) => {
                Some(api::query::PricingRuleError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_DATE_RANGE"]
                #[status = BAD_REQUEST]
                #[message = "`endDate` must not precede `startDate`"]
                InvalidDateRange,

                #[code = "PRICE_OVERFLOW"]
                #[status = BAD_REQUEST]
                #[message = "Final price of the stay is too large"]
                PriceOverflow,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(api::query::PropertyError::NotExists.into())
            }
            Self::InvalidDateRange { .. } => {
                Some(Error::InvalidDateRange.into())
            }
            Self::PriceOverflow(_) => Some(Error::PriceOverflow.into()),
        }
    }
}

impl AsError for command::delete_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BookingNotExists(_) => {
                Some(api::query::BookingError::NotExists.into())
            }
        }
    }
}
