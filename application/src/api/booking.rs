//! [`Booking`]-related definitions.

use std::future;

use common::{Date, DateTime, Handler as _, Price};
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// A booked stay in a `Property`.
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    id: Id,

    /// Underlying [`domain::Booking`], loaded on demand.
    booking: OnceCell<domain::Booking>,
}

impl From<domain::Booking> for Booking {
    fn from(booking: domain::Booking) -> Self {
        Self {
            id: booking.id.into(),
            booking: OnceCell::new_with(Some(booking)),
        }
    }
}

impl Booking {
    /// Returns the underlying [`domain::Booking`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Booking`] doesn't exist.
    async fn booking(&self, ctx: &Context) -> Result<&domain::Booking, Error> {
        let id = self.id.into();
        self.booking
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::booking::ById::by(id))
                    .map_err(AsError::into_error)
                    .and_then(|b| {
                        future::ready(b.ok_or_else(|| {
                            api::query::BookingError::NotExists.into()
                        }))
                    })
                    .map_err(ctx.error())
            })
            .await
    }
}

/// A booked stay in a `Property`.
///
/// `stayLength` and `finalPrice` are fixed at creation and don't follow
/// later changes of the `Property` or its `PricingRule`s.
#[graphql_object(context = Context)]
impl Booking {
    /// Unique identifier of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Booked `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        Ok(api::Property::by_id(self.booking(ctx).await?.property_id))
    }

    /// First day of the stay.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.startDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn start_date(&self, ctx: &Context) -> Result<Date, Error> {
        Ok(self.booking(ctx).await?.start_date)
    }

    /// Last day of the stay.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.endDate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn end_date(&self, ctx: &Context) -> Result<Date, Error> {
        Ok(self.booking(ctx).await?.end_date)
    }

    /// Number of days of the stay, both `startDate` and `endDate` included.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.stayLength",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn stay_length(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.booking(ctx).await?.stay_length.days())
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Price of the whole stay.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.finalPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn final_price(&self, ctx: &Context) -> Result<Price, Error> {
        Ok(self.booking(ctx).await?.final_price)
    }

    /// `DateTime` when this `Booking` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.booking(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Booking`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::booking::Id)]
#[into(domain::booking::Id)]
#[graphql(name = "BookingId", transparent)]
pub struct Id(Uuid);
