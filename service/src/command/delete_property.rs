//! [`Command`] for deleting a [`Property`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Booking, PricingRule};
use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Property`] along with all its
/// [`PricingRule`]s and [`Booking`]s.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteProperty {
    /// ID of the [`Property`] to be deleted.
    pub property_id: property::Id,
}

impl<Db> Command<DeleteProperty> for Service<Db>
where
    Db: Database<
        Delete<By<Option<Property>, property::Id>>,
        Ok = Option<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteProperty { property_id } = cmd;

        self.database()
            .execute(Delete(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
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

#[cfg(test)]
mod spec {
    use common::{Date, Price};
    use rust_decimal_macros::dec;

    use crate::{
        command::{CreateBooking, CreatePricingRule, CreateProperty},
        domain::{pricing_rule::Terms, property, Booking, PricingRule},
        infra::Memory,
        query, Command as _, Service,
    };

    use super::{DeleteProperty, ExecutionError};

    #[tokio::test]
    async fn cascades_to_rules_and_bookings() {
        let service = Service::new(Memory::new());
        let property = service
            .execute(CreateProperty {
                name: property::Name::new("Loft").unwrap(),
                base_price: Price::new(dec!(10)),
            })
            .await
            .unwrap();
        let _ = service
            .execute(CreatePricingRule {
                property_id: property.id,
                terms: Terms::default(),
            })
            .await
            .unwrap();
        let day = Date::from_calendar_date(2022, 1, 1).unwrap();
        let _ = service
            .execute(CreateBooking {
                property_id: property.id,
                start_date: day,
                end_date: day,
            })
            .await
            .unwrap();

        let deleted = service
            .execute(DeleteProperty {
                property_id: property.id,
            })
            .await
            .unwrap();
        assert_eq!(deleted.id, property.id);

        let rules: Vec<PricingRule> = service
            .execute(query::pricing_rules::List::by(()))
            .await
            .unwrap();
        let bookings: Vec<Booking> = service
            .execute(query::bookings::List::by(()))
            .await
            .unwrap();
        assert!(rules.is_empty());
        assert!(bookings.is_empty());
        assert!(service
            .execute(query::property::ById::by(property.id))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn fails_on_unknown_property() {
        let service = Service::new(Memory::new());

        let err = service
            .execute(DeleteProperty {
                property_id: property::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PropertyNotExists(_)));
    }
}
