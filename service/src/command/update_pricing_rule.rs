//! [`Command`] for updating an existing [`PricingRule`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{pricing_rule, PricingRule},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing [`pricing_rule::Terms`] of an existing
/// [`PricingRule`].
///
/// Already created [`Booking`]s keep their prices.
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Copy, Debug)]
pub struct UpdatePricingRule {
    /// ID of the [`PricingRule`] to be updated.
    pub rule_id: pricing_rule::Id,

    /// New [`pricing_rule::Terms`] of the [`PricingRule`].
    pub terms: pricing_rule::Terms,
}

impl<Db> Command<UpdatePricingRule> for Service<Db>
where
    Db: Database<
            Select<By<Option<PricingRule>, pricing_rule::Id>>,
            Ok = Option<PricingRule>,
            Err = Traced<database::Error>,
        > + Database<Update<PricingRule>, Err = Traced<database::Error>>,
{
    type Ok = PricingRule;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePricingRule,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePricingRule { rule_id, terms } = cmd;

        let mut rule = self
            .database()
            .execute(Select(By::<Option<PricingRule>, _>::new(rule_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PricingRuleNotExists(rule_id))
            .map_err(tracerr::wrap!())?;
        if rule.terms == terms {
            return Ok(rule);
        }

        rule.terms = terms;
        rule.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(rule))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(rule)
    }
}

/// Error of [`UpdatePricingRule`] [`Command`] execution.
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
    use common::{Date, Percent, Price};
    use rust_decimal_macros::dec;

    use crate::{
        command::{CreatePricingRule, CreateProperty},
        domain::{
            booking::StayLength,
            pricing_rule::{self, Kind, Terms},
            property,
        },
        infra::Memory,
        query, Command as _, Service,
    };

    use super::{ExecutionError, UpdatePricingRule};

    #[tokio::test]
    async fn replaces_all_terms() {
        let service = Service::new(Memory::new());
        let property = service
            .execute(CreateProperty {
                name: property::Name::new("Chalet").unwrap(),
                base_price: Price::new(dec!(80)),
            })
            .await
            .unwrap();
        let rule = service
            .execute(CreatePricingRule {
                property_id: property.id,
                terms: Terms {
                    min_stay_length: Some(StayLength::new(7)),
                    price_modifier: Percent::new(dec!(-10)),
                    ..Terms::default()
                },
            })
            .await
            .unwrap();

        let terms = Terms {
            specific_day: Date::from_calendar_date(2022, 12, 24),
            fixed_price: Some(Price::new(dec!(300))),
            ..Terms::default()
        };
        let updated = service
            .execute(UpdatePricingRule {
                rule_id: rule.id,
                terms,
            })
            .await
            .unwrap();

        assert_eq!(updated.terms, terms);
        assert_eq!(updated.kind(), Kind::SpecificDay);
        assert_eq!(updated.property_id, property.id);

        let stored = service
            .execute(query::pricing_rule::ById::by(rule.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.terms, terms);
    }

    #[tokio::test]
    async fn fails_on_unknown_rule() {
        let service = Service::new(Memory::new());

        let err = service
            .execute(UpdatePricingRule {
                rule_id: pricing_rule::Id::new(),
                terms: Terms::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PricingRuleNotExists(_),
        ));
    }
}
