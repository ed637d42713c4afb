//! [`Property`]-related definitions.

use std::future;

use common::{DateTime, Handler as _, Price};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A bookable property.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    id: Id,

    /// Underlying [`domain::Property`], loaded on demand.
    property: OnceCell<domain::Property>,
}

impl From<domain::Property> for Property {
    fn from(property: domain::Property) -> Self {
        Self {
            id: property.id.into(),
            property: OnceCell::new_with(Some(property)),
        }
    }
}

impl Property {
    /// Creates a new [`Property`] with the provided ID, loading its data on
    /// the first access.
    ///
    /// Accessing the data of a missing [`domain::Property`] results in the
    /// `PROPERTY_NOT_EXISTS` [`Error`].
    #[must_use]
    pub fn by_id(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            property: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Property`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Property`] doesn't exist.
    async fn property(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Property, Error> {
        let id = self.id.into();
        self.property
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::property::ById::by(id))
                    .map_err(AsError::into_error)
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::PropertyError::NotExists.into()
                        }))
                    })
                    .map_err(ctx.error())
            })
            .await
    }
}

/// A bookable property.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.property(ctx).await?.name.clone().into())
    }

    /// Price of a single day of stay in this `Property`, applied when no
    /// `PricingRule` matches.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.basePrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn base_price(&self, ctx: &Context) -> Result<Price, Error> {
        Ok(self.property(ctx).await?.base_price)
    }

    /// `PricingRule`s of this `Property`, in their creation order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.pricingRules",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn pricing_rules(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::PricingRule>, Error> {
        ctx.service()
            .execute(query::pricing_rules::OfProperty::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rules| rules.into_iter().map(Into::into).collect())
    }

    /// `Booking`s of this `Property`, in their creation order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.bookings",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bookings(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        ctx.service()
            .execute(query::bookings::OfProperty::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|bookings| bookings.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `Property` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.property(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Property` was modified last time.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.property(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `Property`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::property::Id)]
#[into(domain::property::Id)]
#[graphql(name = "PropertyId", transparent)]
pub struct Id(Uuid);

/// Name of a `Property`.
///
/// Non-empty, without leading or trailing whitespace, and at most 255
/// characters long.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyName",
    with = scalar::Via::<domain::property::Name>,
)]
pub struct Name(domain::property::Name);
