//! Domain definitions.

pub mod booking;
pub mod pricing;
pub mod pricing_rule;
pub mod property;

pub use self::{
    booking::Booking, pricing::Quote, pricing_rule::PricingRule,
    property::Property,
};
