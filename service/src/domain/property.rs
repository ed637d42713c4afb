//! [`Property`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Price};
use derive_more::{AsRef, Display, From, FromStr, Into};
use uuid::Uuid;

/// Bookable property.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Name`] of this [`Property`].
    pub name: Name,

    /// [`Price`] of a single day of stay in this [`Property`].
    pub base_price: Price,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was modified last time.
    pub updated_at: ModificationDateTime,
}

/// ID of a [`Property`].
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

/// Name of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Maximum number of characters in a [`Name`].
    pub const MAX_LEN: usize = 255;

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name
            && !name.is_empty()
            && name.chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was modified.
pub type ModificationDateTime = DateTimeOf<(Property, unit::Modification)>;
