//! [`Booking`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateTimeOf, Price};
use derive_more::{Display, From, FromStr, Into};
use uuid::Uuid;

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Property;

/// Booking of a [`Property`] for a range of days.
///
/// [`StayLength`] and final [`Price`] are computed once on creation and
/// never recomputed afterwards.
#[derive(Clone, Copy, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the booked [`Property`].
    pub property_id: property::Id,

    /// First booked day (inclusive).
    pub start_date: Date,

    /// Last booked day (inclusive).
    pub end_date: Date,

    /// Number of booked days.
    pub stay_length: StayLength,

    /// Total [`Price`] of this [`Booking`].
    pub final_price: Price,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Booking`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Number of days of a stay, both boundary days included.
///
/// May be non-positive for a reversed range of days.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct StayLength(i64);

impl StayLength {
    /// Creates a new [`StayLength`] of the provided number of `days`.
    #[must_use]
    pub const fn new(days: i64) -> Self {
        Self(days)
    }

    /// Returns the number of days in this [`StayLength`].
    #[must_use]
    pub const fn days(self) -> i64 {
        self.0
    }
}

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;
