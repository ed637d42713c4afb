//! [`Query`] collection related to the multiple [`PricingRule`]s.

use common::operations::By;

use crate::domain::{property, PricingRule};
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::DatabaseQuery;

/// Queries all the [`PricingRule`]s in their creation order.
pub type List = DatabaseQuery<By<Vec<PricingRule>, ()>>;

/// Queries the [`PricingRule`]s of a [`Property`] in their creation order.
pub type OfProperty = DatabaseQuery<By<Vec<PricingRule>, property::Id>>;
