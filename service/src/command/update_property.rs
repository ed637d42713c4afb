//! [`Command`] for updating an existing [`Property`].

use common::{
    operations::{By, Select, Update},
    DateTime, Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::Name;
use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Property`].
///
/// Existing [`Booking`]s of the [`Property`] are not affected.
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to be updated.
    pub property_id: property::Id,

    /// New [`Name`] of the [`Property`], if it should be changed.
    pub name: Option<property::Name>,

    /// New base [`Price`] of the [`Property`], if it should be changed.
    pub base_price: Option<Price>,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            property_id,
            name,
            base_price,
        } = cmd;

        let mut property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let name = name.filter(|n| *n != property.name);
        let base_price = base_price.filter(|p| *p != property.base_price);
        if name.is_none() && base_price.is_none() {
            return Ok(property);
        }

        if let Some(name) = name {
            property.name = name;
        }
        if let Some(price) = base_price {
            property.base_price = price;
        }
        property.updated_at = DateTime::now().coerce();

        self.database()
            .execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
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
