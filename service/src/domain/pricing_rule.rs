//! [`PricingRule`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, Percent, Price};
use derive_more::{Display, From, FromStr, Into};
use uuid::Uuid;

use crate::domain::{booking::StayLength, property};
#[cfg(doc)]
use crate::domain::Property;

/// Rule adjusting the price of a [`Property`] stay.
#[derive(Clone, Copy, Debug)]
pub struct PricingRule {
    /// ID of this [`PricingRule`].
    pub id: Id,

    /// ID of the [`Property`] this [`PricingRule`] belongs to.
    pub property_id: property::Id,

    /// [`Terms`] of this [`PricingRule`].
    pub terms: Terms,

    /// [`DateTime`] when this [`PricingRule`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`PricingRule`] was modified last time.
    pub updated_at: ModificationDateTime,
}

impl PricingRule {
    /// Returns [`Kind`] of this [`PricingRule`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.terms.kind()
    }
}

impl AsRef<Terms> for PricingRule {
    fn as_ref(&self) -> &Terms {
        &self.terms
    }
}

/// ID of a [`PricingRule`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Conditions and effects of a [`PricingRule`].
///
/// Every field is optional and only pairs matter:
/// - [`Terms::min_stay_length`] with [`Terms::price_modifier`] form a
///   threshold rule;
/// - [`Terms::specific_day`] with [`Terms::fixed_price`] form a specific-day
///   rule.
///
/// A half of a pair alone has no effect. A present zero value still counts as
/// present.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Terms {
    /// Minimum [`StayLength`] the [`Terms::price_modifier`] applies from.
    pub min_stay_length: Option<StayLength>,

    /// [`Percent`] the stay price is adjusted by.
    pub price_modifier: Option<Percent>,

    /// Day the [`Terms::fixed_price`] is charged for.
    pub specific_day: Option<Date>,

    /// [`Price`] charged for the [`Terms::specific_day`].
    pub fixed_price: Option<Price>,
}

impl Terms {
    /// Returns the threshold condition and its modifier, if both are present.
    #[must_use]
    pub fn threshold(&self) -> Option<(StayLength, Percent)> {
        self.min_stay_length.zip(self.price_modifier)
    }

    /// Returns the specific day and its fixed price, if both are present.
    #[must_use]
    pub fn specific_day_price(&self) -> Option<(Date, Price)> {
        self.specific_day.zip(self.fixed_price)
    }

    /// Returns [`Kind`] of these [`Terms`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match (self.threshold(), self.specific_day_price()) {
            (Some(_), Some(_)) => Kind::Combined,
            (Some(_), None) => Kind::Threshold,
            (None, Some(_)) => Kind::SpecificDay,
            (None, None) => Kind::Inert,
        }
    }
}

impl AsRef<Terms> for Terms {
    fn as_ref(&self) -> &Terms {
        self
    }
}

/// Kind of a [`PricingRule`], derived from its [`Terms`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Percentage modifier applied from a minimum stay length.
    Threshold,

    /// Fixed price charged for a single day.
    SpecificDay,

    /// Both [`Kind::Threshold`] and [`Kind::SpecificDay`] at once.
    Combined,

    /// Neither pattern is complete, so the rule never applies.
    Inert,
}

/// [`DateTime`] when a [`PricingRule`] was created.
pub type CreationDateTime = DateTimeOf<(PricingRule, unit::Creation)>;

/// [`DateTime`] when a [`PricingRule`] was modified.
pub type ModificationDateTime = DateTimeOf<(PricingRule, unit::Modification)>;
