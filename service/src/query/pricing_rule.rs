//! [`Query`] collection related to a single [`PricingRule`].

use common::operations::By;

use crate::domain::{pricing_rule, PricingRule};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`PricingRule`] by its [`pricing_rule::Id`].
pub type ById = DatabaseQuery<By<Option<PricingRule>, pricing_rule::Id>>;
