//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "property",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(query::property::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PropertyError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all the `Property`s in their creation order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "properties",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn properties(
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        ctx.service()
            .execute(query::properties::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|props| props.into_iter().map(Into::into).collect())
    }

    /// Returns the `PricingRule` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PRICING_RULE_NOT_EXISTS` - the `PricingRule` with the specified ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "pricingRule",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn pricing_rule(
        id: api::pricing_rule::Id,
        ctx: &Context,
    ) -> Result<api::PricingRule, Error> {
        ctx.service()
            .execute(query::pricing_rule::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PricingRuleError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `PricingRule`s in their creation order, either all of
    /// them or only the ones of the specified `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "pricingRules",
            otel.name = Self::SPAN_NAME,
            property_id = ?property_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn pricing_rules(
        property_id: Option<api::property::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::PricingRule>, Error> {
        let rules = if let Some(id) = property_id {
            ctx.service()
                .execute(query::pricing_rules::OfProperty::by(id.into()))
                .await
        } else {
            ctx.service()
                .execute(query::pricing_rules::List::by(()))
                .await
        };
        rules
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rules| rules.into_iter().map(Into::into).collect())
    }

    /// Returns the `Booking` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "booking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn booking(
        id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(query::booking::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| BookingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Booking`s in their creation order, either all of them or
    /// only the ones of the specified `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "bookings",
            otel.name = Self::SPAN_NAME,
            property_id = ?property_id.map(|id| id.to_string()),
        ),
    )]
    pub async fn bookings(
        property_id: Option<api::property::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        let bookings = if let Some(id) = property_id {
            ctx.service()
                .execute(query::bookings::OfProperty::by(id.into()))
                .await
        } else {
            ctx.service().execute(query::bookings::List::by(())).await
        };
        bookings
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|bookings| bookings.into_iter().map(Into::into).collect())
    }
}

define_error! {
    enum BookingError {
        #[code = "BOOKING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Booking` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum PricingRuleError {
        #[code = "PRICING_RULE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`PricingRule` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the specified ID does not exist"]
        NotExists,
    }
}
