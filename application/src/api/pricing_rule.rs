//! [`PricingRule`]-related definitions.

use std::future;

use common::{Date, DateTime, Handler as _, Percent, Price};
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// A rule adjusting the price of a `Property` stay.
#[derive(Clone, Debug)]
pub struct PricingRule {
    /// ID of this [`PricingRule`].
    id: Id,

    /// Underlying [`domain::PricingRule`], loaded on demand.
    rule: OnceCell<domain::PricingRule>,
}

impl From<domain::PricingRule> for PricingRule {
    fn from(rule: domain::PricingRule) -> Self {
        Self {
            id: rule.id.into(),
            rule: OnceCell::new_with(Some(rule)),
        }
    }
}

impl PricingRule {
    /// Returns the underlying [`domain::PricingRule`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::PricingRule`] doesn't exist.
    async fn rule(&self, ctx: &Context) -> Result<&domain::PricingRule, Error> {
        let id = self.id.into();
        self.rule
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::pricing_rule::ById::by(id))
                    .map_err(AsError::into_error)
                    .and_then(|r| {
                        future::ready(r.ok_or_else(|| {
                            api::query::PricingRuleError::NotExists.into()
                        }))
                    })
                    .map_err(ctx.error())
            })
            .await
    }

    /// Returns the [`domain::pricing_rule::Terms`] of this [`PricingRule`].
    async fn terms(
        &self,
        ctx: &Context,
    ) -> Result<&domain::pricing_rule::Terms, Error> {
        Ok(&self.rule(ctx).await?.terms)
    }
}

/// A rule adjusting the price of a `Property` stay.
///
/// Either a threshold rule (`minStayLength` with `priceModifier`), or a
/// specific-day rule (`specificDay` with `fixedPrice`), or both at once.
#[graphql_object(context = Context)]
impl PricingRule {
    /// Unique identifier of this `PricingRule`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Property` this `PricingRule` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        Ok(api::Property::by_id(self.rule(ctx).await?.property_id))
    }

    /// Kind of this `PricingRule`, derived from its filled fields.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.rule(ctx).await?.kind().into())
    }

    /// Minimum number of days of a stay for the `priceModifier` to apply.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.minStayLength",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn min_stay_length(
        &self,
        ctx: &Context,
    ) -> Result<Option<i32>, Error> {
        self.terms(ctx)
            .await?
            .min_stay_length
            .map(|l| i32::try_from(l.days()))
            .transpose()
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Percentage modifier of the daily price (negative for a discount).
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.priceModifier",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price_modifier(
        &self,
        ctx: &Context,
    ) -> Result<Option<Percent>, Error> {
        Ok(self.terms(ctx).await?.price_modifier)
    }

    /// Calendar day charged with the `fixedPrice`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.specificDay",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn specific_day(
        &self,
        ctx: &Context,
    ) -> Result<Option<Date>, Error> {
        Ok(self.terms(ctx).await?.specific_day)
    }

    /// Price charged for the `specificDay`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.fixedPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn fixed_price(
        &self,
        ctx: &Context,
    ) -> Result<Option<Price>, Error> {
        Ok(self.terms(ctx).await?.fixed_price)
    }

    /// `DateTime` when this `PricingRule` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.rule(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `PricingRule` was modified last time.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "PricingRule.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.rule(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `PricingRule`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::pricing_rule::Id)]
#[into(domain::pricing_rule::Id)]
#[graphql(name = "PricingRuleId", transparent)]
pub struct Id(Uuid);

/// Kind of a `PricingRule`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PricingRuleKind")]
pub enum Kind {
    /// Percentage modifier applied from a minimum stay length.
    Threshold,

    /// Fixed price charged for a single day.
    SpecificDay,

    /// Both a threshold and a specific day.
    Combined,

    /// Neither pair of fields is complete, so the rule never applies.
    Inert,
}

impl From<domain::pricing_rule::Kind> for Kind {
    fn from(kind: domain::pricing_rule::Kind) -> Self {
        use domain::pricing_rule::Kind as K;
        match kind {
            K::Threshold => Self::Threshold,
            K::SpecificDay => Self::SpecificDay,
            K::Combined => Self::Combined,
            K::Inert => Self::Inert,
        }
    }
}
