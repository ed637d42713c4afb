//! [`Command`] definition.

pub mod create_booking;
pub mod create_pricing_rule;
pub mod create_property;
pub mod delete_booking;
pub mod delete_pricing_rule;
pub mod delete_property;
pub mod update_pricing_rule;
pub mod update_property;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_booking::CreateBooking, create_pricing_rule::CreatePricingRule,
    create_property::CreateProperty, delete_booking::DeleteBooking,
    delete_pricing_rule::DeletePricingRule, delete_property::DeleteProperty,
    update_pricing_rule::UpdatePricingRule, update_property::UpdateProperty,
};
