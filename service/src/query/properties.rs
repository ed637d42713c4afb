//! [`Query`] collection related to the multiple [`Property`].

use common::operations::By;

use crate::domain::Property;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Property`] in their creation order.
pub type List = DatabaseQuery<By<Vec<Property>, ()>>;
