//! [`Command`] for creating a new [`Booking`].

use common::{
    operations::{By, Insert, Select},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, pricing, property, Booking, PricingRule, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for booking a [`Property`] for a range of days.
///
/// The stay length and the final price are computed out of the current
/// base price and [`PricingRule`]s of the [`Property`], and stored in the
/// created [`Booking`] as is.
#[derive(Clone, Copy, Debug)]
pub struct CreateBooking {
    /// ID of the [`Property`] to be booked.
    pub property_id: property::Id,

    /// First day of the stay (inclusive).
    pub start_date: Date,

    /// Last day of the stay (inclusive).
    pub end_date: Date,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<PricingRule>, property::Id>>,
            Ok = Vec<PricingRule>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking {
            property_id,
            start_date,
            end_date,
        } = cmd;

        if end_date < start_date {
            return Err(tracerr::new!(E::InvalidDateRange {
                start_date,
                end_date,
            }));
        }

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let rules = self
            .database()
            .execute(Select(By::<Vec<PricingRule>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let quote =
            pricing::quote(rules, start_date, end_date, property.base_price)
                .ok_or(E::PriceOverflow(property_id))
                .map_err(tracerr::wrap!())?;
        log::debug!(
            "`Property(id: {property_id})` booked from {start_date} to \
             {end_date}: {} days for {}",
            quote.stay_length,
            quote.final_price,
        );

        let booking = Booking {
            id: booking::Id::new(),
            property_id,
            start_date,
            end_date,
            stay_length: quote.stay_length,
            final_price: quote.final_price,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(booking))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(booking)
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// End date of the stay precedes its start date.
    #[display("End date {end_date} precedes start date {start_date}")]
    #[from(ignore)]
    InvalidDateRange {
        /// Requested first day of the stay.
        start_date: Date,

        /// Requested last day of the stay.
        end_date: Date,
    },

    /// Final price of the stay exceeds the representable amount.
    #[display("Final price overflows for `Property(id: {_0})`")]
    #[from(ignore)]
    PriceOverflow(#[error(not(source))] property::Id),
}
