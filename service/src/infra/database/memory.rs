//! In-memory [`Database`] implementation.

use std::sync::Arc;

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error as StdError};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{property, Booking, PricingRule},
    infra::{database, Database},
};

use self::record::{Record, Storage};

/// In-memory [`Database`].
///
/// Clones share the same storage. Lists are returned in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<Storage>>);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// [`Memory`] database [`Error`].
///
/// [`Error`]: std::error::Error
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Entity with the same ID is stored already.
    #[display("`{_0}` with the same ID already exists")]
    Duplicate(#[error(not(source))] &'static str),

    /// Entity to be updated or referenced is not stored.
    #[display("`{_0}` does not exist")]
    Missing(#[error(not(source))] &'static str),
}

mod record {
    //! Sealed [`Record`] abstraction over the [`Memory`] storage.

    use crate::domain::{
        booking, pricing_rule, property, Booking, PricingRule, Property,
    };

    #[cfg(doc)]
    use super::Memory;
    use super::Error;

    /// Storage of all the [`Memory`] entities.
    #[derive(Debug, Default)]
    pub struct Storage {
        /// Stored [`Property`] entities.
        pub properties: Vec<Property>,

        /// Stored [`PricingRule`] entities.
        pub pricing_rules: Vec<PricingRule>,

        /// Stored [`Booking`] entities.
        pub bookings: Vec<Booking>,
    }

    /// Entity stored in a [`Memory`] database.
    pub trait Record: Clone + Sized {
        /// Type of this [`Record`] ID.
        type Id: Copy + Eq;

        /// Human-readable name of this [`Record`] kind.
        const NAME: &'static str;

        /// Returns ID of this [`Record`].
        fn id(&self) -> Self::Id;

        /// Returns all the stored [`Record`]s of this kind.
        fn table(storage: &Storage) -> &Vec<Self>;

        /// Returns all the stored [`Record`]s of this kind for modification.
        fn table_mut(storage: &mut Storage) -> &mut Vec<Self>;

        /// Checks whether everything this [`Record`] refers to is stored.
        fn check_references(&self, _: &Storage) -> Result<(), Error> {
            Ok(())
        }

        /// Removes everything depending on the [`Record`] with the provided
        /// `id`.
        fn remove_dependents(_: &mut Storage, _: Self::Id) {}
    }

    impl Record for Property {
        type Id = property::Id;

        const NAME: &'static str = "Property";

        fn id(&self) -> Self::Id {
            self.id
        }

        fn table(storage: &Storage) -> &Vec<Self> {
            &storage.properties
        }

        fn table_mut(storage: &mut Storage) -> &mut Vec<Self> {
            &mut storage.properties
        }

        fn remove_dependents(storage: &mut Storage, id: Self::Id) {
            storage.pricing_rules.retain(|r| r.property_id != id);
            storage.bookings.retain(|b| b.property_id != id);
        }
    }

    impl Record for PricingRule {
        type Id = pricing_rule::Id;

        const NAME: &'static str = "PricingRule";

        fn id(&self) -> Self::Id {
            self.id
        }

        fn table(storage: &Storage) -> &Vec<Self> {
            &storage.pricing_rules
        }

        fn table_mut(storage: &mut Storage) -> &mut Vec<Self> {
            &mut storage.pricing_rules
        }

        fn check_references(&self, storage: &Storage) -> Result<(), Error> {
            property_exists(storage, self.property_id)
        }
    }

    impl Record for Booking {
        type Id = booking::Id;

        const NAME: &'static str = "Booking";

        fn id(&self) -> Self::Id {
            self.id
        }

        fn table(storage: &Storage) -> &Vec<Self> {
            &storage.bookings
        }

        fn table_mut(storage: &mut Storage) -> &mut Vec<Self> {
            &mut storage.bookings
        }

        fn check_references(&self, storage: &Storage) -> Result<(), Error> {
            property_exists(storage, self.property_id)
        }
    }

    /// Checks whether the [`Property`] with the provided `id` is stored.
    fn property_exists(
        storage: &Storage,
        id: property::Id,
    ) -> Result<(), Error> {
        storage
            .properties
            .iter()
            .any(|p| p.id == id)
            .then_some(())
            .ok_or(Error::Missing(Property::NAME))
    }
}

impl<T> Database<Select<By<Option<T>, T::Id>>> for Memory
where
    T: Record,
{
    type Ok = Option<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<T>, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let storage = self.0.read().await;
        Ok(T::table(&storage).iter().find(|r| r.id() == id).cloned())
    }
}

impl<T> Database<Select<By<Vec<T>, ()>>> for Memory
where
    T: Record,
{
    type Ok = Vec<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<T>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(T::table(&*self.0.read().await).clone())
    }
}

impl Database<Select<By<Vec<PricingRule>, property::Id>>> for Memory {
    type Ok = Vec<PricingRule>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<PricingRule>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let property_id = by.into_inner();
        Ok(self
            .0
            .read()
            .await
            .pricing_rules
            .iter()
            .filter(|r| r.property_id == property_id)
            .copied()
            .collect())
    }
}

impl Database<Select<By<Vec<Booking>, property::Id>>> for Memory {
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let property_id = by.into_inner();
        Ok(self
            .0
            .read()
            .await
            .bookings
            .iter()
            .filter(|b| b.property_id == property_id)
            .copied()
            .collect())
    }
}

impl<T> Database<Insert<T>> for Memory
where
    T: Record,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<T>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut storage = self.0.write().await;

        record
            .check_references(&storage)
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;

        let id = record.id();
        let table = T::table_mut(&mut storage);
        if table.iter().any(|r| r.id() == id) {
            return Err(tracerr::new!(database::Error::from(
                Error::Duplicate(T::NAME)
            )));
        }
        table.push(record);

        Ok(())
    }
}

impl<T> Database<Update<T>> for Memory
where
    T: Record,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(record): Update<T>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut storage = self.0.write().await;

        let id = record.id();
        let stored = T::table_mut(&mut storage)
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(Error::Missing(T::NAME))
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        *stored = record;

        Ok(())
    }
}

impl<T> Database<Delete<By<Option<T>, T::Id>>> for Memory
where
    T: Record,
{
    type Ok = Option<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<T>, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut storage = self.0.write().await;

        let table = T::table_mut(&mut storage);
        let Some(pos) = table.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        let removed = table.remove(pos);
        T::remove_dependents(&mut storage, id);

        Ok(Some(removed))
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Delete, Insert, Select, Update},
        Date, DateTime, Price,
    };
    use rust_decimal_macros::dec;

    use crate::{
        domain::{
            booking, pricing_rule, property, Booking, PricingRule, Property,
        },
        infra::{database, Database as _},
    };

    use super::{Error, Memory};

    fn property(name: &str) -> Property {
        Property {
            id: property::Id::new(),
            name: property::Name::new(name).unwrap(),
            base_price: Price::new(dec!(10)),
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn rule(property_id: property::Id) -> PricingRule {
        PricingRule {
            id: pricing_rule::Id::new(),
            property_id,
            terms: pricing_rule::Terms::default(),
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn booking(property_id: property::Id) -> Booking {
        let day = Date::from_calendar_date(2022, 1, 1).unwrap();
        Booking {
            id: booking::Id::new(),
            property_id,
            start_date: day,
            end_date: day,
            stay_length: booking::StayLength::new(1),
            final_price: Price::new(dec!(10)),
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let db = Memory::new();
        let names = ["b", "a", "c"];
        for name in names {
            db.execute(Insert(property(name))).await.unwrap();
        }

        let stored = db
            .execute(Select(By::<Vec<Property>, _>::new(())))
            .await
            .unwrap();

        assert_eq!(
            stored.iter().map(|p| p.name.to_string()).collect::<Vec<_>>(),
            names,
        );
    }

    #[tokio::test]
    async fn rejects_duplicates() {
        let db = Memory::new();
        let p = property("a");
        db.execute(Insert(p.clone())).await.unwrap();

        let err = db.execute(Insert(p)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(Error::Duplicate("Property")),
        ));
    }

    #[tokio::test]
    async fn rejects_updating_missing() {
        let db = Memory::new();

        let err = db.execute(Update(property("a"))).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(Error::Missing("Property")),
        ));
    }

    #[tokio::test]
    async fn rejects_dangling_references() {
        let db = Memory::new();

        let err = db
            .execute(Insert(rule(property::Id::new())))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(Error::Missing("Property")),
        ));
    }

    #[tokio::test]
    async fn selects_by_property() {
        let db = Memory::new();
        let (a, b) = (property("a"), property("b"));
        db.execute(Insert(a.clone())).await.unwrap();
        db.execute(Insert(b.clone())).await.unwrap();
        let (rule_a, rule_b) = (rule(a.id), rule(b.id));
        db.execute(Insert(rule_a)).await.unwrap();
        db.execute(Insert(rule_b)).await.unwrap();

        let rules = db
            .execute(Select(By::<Vec<PricingRule>, _>::new(a.id)))
            .await
            .unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, rule_a.id);
    }

    #[tokio::test]
    async fn deleting_property_cascades() {
        let db = Memory::new();
        let (a, b) = (property("a"), property("b"));
        db.execute(Insert(a.clone())).await.unwrap();
        db.execute(Insert(b.clone())).await.unwrap();
        db.execute(Insert(rule(a.id))).await.unwrap();
        db.execute(Insert(booking(a.id))).await.unwrap();
        db.execute(Insert(booking(b.id))).await.unwrap();

        let deleted = db
            .execute(Delete(By::<Option<Property>, _>::new(a.id)))
            .await
            .unwrap();
        assert_eq!(deleted.map(|p| p.id), Some(a.id));

        let rules = db
            .execute(Select(By::<Vec<PricingRule>, _>::new(())))
            .await
            .unwrap();
        let bookings = db
            .execute(Select(By::<Vec<Booking>, _>::new(())))
            .await
            .unwrap();
        assert!(rules.is_empty());
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].property_id, b.id);

        let deleted = db
            .execute(Delete(By::<Option<Property>, _>::new(a.id)))
            .await
            .unwrap();
        assert!(deleted.is_none());
    }
}
