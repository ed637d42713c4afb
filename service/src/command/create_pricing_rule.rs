//! [`Command`] for creating a new [`PricingRule`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{pricing_rule, property, PricingRule, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`PricingRule`] of a [`Property`].
#[derive(Clone, Copy, Debug)]
pub struct CreatePricingRule {
    /// ID of the [`Property`] a new [`PricingRule`] belongs to.
    pub property_id: property::Id,

    /// [`pricing_rule::Terms`] of a new [`PricingRule`].
    pub terms: pricing_rule::Terms,
}

impl<Db> Command<CreatePricingRule> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Insert<PricingRule>, Err = Traced<database::Error>>,
{
    type Ok = PricingRule;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePricingRule,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePricingRule { property_id, terms } = cmd;

        self.database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let now = DateTime::now();
        let rule = PricingRule {
            id: pricing_rule::Id::new(),
            property_id,
            terms,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(rule))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(rule)
    }
}

/// Error of [`CreatePricingRule`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}
