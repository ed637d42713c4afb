//! [`Command`] for creating a new [`Property`].

use common::{operations::Insert, DateTime, Price};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::Name;
use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// [`Name`] of a new [`Property`].
    pub name: property::Name,

    /// Base [`Price`] of a single day in a new [`Property`].
    pub base_price: Price,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Insert<Property>, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateProperty { name, base_price } = cmd;

        let now = DateTime::now();
        let property = Property {
            id: property::Id::new(),
            name,
            base_price,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(property.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use common::Price;
    use rust_decimal_macros::dec;

    use crate::{
        domain::{property, Property},
        infra::Memory,
        query, Command as _, Service,
    };

    use super::CreateProperty;

    #[tokio::test]
    async fn persists_property() {
        let service = Service::new(Memory::new());

        let created = service
            .execute(CreateProperty {
                name: property::Name::new("Sea View").unwrap(),
                base_price: Price::new(dec!(120.5)),
            })
            .await
            .unwrap();

        let stored = service
            .execute(query::property::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, created.name);
        assert_eq!(stored.base_price, Price::new(dec!(120.5)));
        assert_eq!(
            stored.created_at.to_rfc3339(),
            stored.updated_at.to_rfc3339(),
        );

        let all: Vec<Property> = service
            .execute(query::properties::List::by(()))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }
}
