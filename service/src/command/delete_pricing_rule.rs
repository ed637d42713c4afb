//! [`Command`] for deleting a [`PricingRule`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{pricing_rule, PricingRule},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`PricingRule`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeletePricingRule {
    /// ID of the [`PricingRule`] to be deleted.
    pub rule_id: pricing_rule::Id,
}

impl<Db> Command<DeletePricingRule> for Service<Db>
where
    Db: Database<
        Delete<By<Option<PricingRule>, pricing_rule::Id>>,
        Ok = Option<PricingRule>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = PricingRule;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePricingRule,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePricingRule { rule_id } = cmd;

        self.database()
            .execute(Delete(By::new(rule_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PricingRuleNotExists(rule_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeletePricingRule`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`PricingRule`] doesn't exist.
    #[display("`PricingRule(id: {_0})` does not exist")]
    #[from(ignore)]
    PricingRuleNotExists(#[error(not(source))] pricing_rule::Id),
}

#[cfg(test)]
mod spec {
    use common::Price;
    use rust_decimal_macros::dec;

    use crate::{
        command::{CreatePricingRule, CreateProperty},
        domain::{pricing_rule, property, PricingRule},
        infra::Memory,
        query, Command as _, Service,
    };

    use super::{DeletePricingRule, ExecutionError};

    #[tokio::test]
    async fn detaches_rule_from_property() {
        let service = Service::new(Memory::new());
        let property = service
            .execute(CreateProperty {
                name: property::Name::new("Barn").unwrap(),
                base_price: Price::new(dec!(30)),
            })
            .await
            .unwrap();
        let rule = service
            .execute(CreatePricingRule {
                property_id: property.id,
                terms: pricing_rule::Terms::default(),
            })
            .await
            .unwrap();

        let deleted = service
            .execute(DeletePricingRule { rule_id: rule.id })
            .await
            .unwrap();
        assert_eq!(deleted.id, rule.id);

        let rules: Vec<PricingRule> = service
            .execute(query::pricing_rules::OfProperty::by(property.id))
            .await
            .unwrap();
        assert!(rules.is_empty());
    }

    #[tokio::test]
    async fn fails_on_unknown_rule() {
        let service = Service::new(Memory::new());
        let id = pricing_rule::Id::new();

        let err = service
            .execute(DeletePricingRule { rule_id: id })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PricingRuleNotExists(i) if *i == id,
        ));
    }
}
