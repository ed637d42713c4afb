//! [`Command`] for deleting a [`Booking`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking, Booking},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Booking`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteBooking {
    /// ID of the [`Booking`] to be deleted.
    pub booking_id: booking::Id,
}

impl<Db> Command<DeleteBooking> for Service<Db>
where
    Db: Database<
        Delete<By<Option<Booking>, booking::Id>>,
        Ok = Option<Booking>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteBooking { booking_id } = cmd;

        self.database()
            .execute(Delete(By::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteBooking`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),
}

#[cfg(test)]
mod spec {
    use common::{Date, Price};
    use rust_decimal_macros::dec;

    use crate::{
        command::{CreateBooking, CreateProperty},
        domain::property,
        infra::Memory,
        query, Command as _, Service,
    };

    use super::{DeleteBooking, ExecutionError};

    #[tokio::test]
    async fn deletes_only_once() {
        let service = Service::new(Memory::new());
        let property = service
            .execute(CreateProperty {
                name: property::Name::new("Studio").unwrap(),
                base_price: Price::new(dec!(40)),
            })
            .await
            .unwrap();
        let day = Date::from_calendar_date(2022, 3, 1).unwrap();
        let booking = service
            .execute(CreateBooking {
                property_id: property.id,
                start_date: day,
                end_date: day,
            })
            .await
            .unwrap();

        let deleted = service
            .execute(DeleteBooking {
                booking_id: booking.id,
            })
            .await
            .unwrap();
        assert_eq!(deleted.id, booking.id);
        assert!(service
            .execute(query::booking::ById::by(booking.id))
            .await
            .unwrap()
            .is_none());

        let err = service
            .execute(DeleteBooking {
                booking_id: booking.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::BookingNotExists(id) if *id == booking.id,
        ));
    }
}
