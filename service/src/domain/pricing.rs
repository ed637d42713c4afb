//! Stay price computation out of [`PricingRule`]s.
//!
//! The computation is pure: absent or partial [`Terms`] mean the rule doesn't
//! apply. The only failure is an amount overflowing the [`Price`] range,
//! reported as [`None`].

use common::{Date, Price};

#[cfg(doc)]
use crate::domain::{Booking, PricingRule};
use crate::domain::{booking::StayLength, pricing_rule::Terms};

/// Result of pricing a stay.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Number of days in the stay.
    pub stay_length: StayLength,

    /// Total [`Price`] of the stay, rounded to [`Price::SCALE`] decimal
    /// places.
    pub final_price: Price,
}

/// Calculates the [`StayLength`] between the provided dates, counting both of
/// them.
///
/// Dates order isn't validated, so a reversed range results in a
/// non-positive [`StayLength`].
#[must_use]
pub fn calculate_stay_length(start_date: Date, end_date: Date) -> StayLength {
    StayLength::new(start_date.days_until(end_date) + 1)
}

/// Sorts the provided `rules` by their [`Terms::min_stay_length`] ascending.
///
/// Rules without a minimum stay length go first. The sort is stable, so rules
/// with equal keys preserve their relative order.
#[must_use]
pub fn sort_rules<R: AsRef<Terms>>(mut rules: Vec<R>) -> Vec<R> {
    // `None` orders before any `Some`.
    rules.sort_by_key(|r| AsRef::<Terms>::as_ref(r).min_stay_length);
    rules
}

/// Calculates the final [`Price`] of a stay by applying the provided
/// `sorted_rules` in order.
///
/// Every specific-day rule matching a day within the stay adds its fixed
/// price and excludes that day from the base price calculation. Every
/// satisfied threshold rule adjusts the base price of the remaining days:
/// the adjusted price overwrites the running total unless some specific-day
/// rule has matched before, in which case it's added to the total.
///
/// If nothing contributed, the plain `base_price × stay_length` is used.
///
/// The result is rounded once, at the very end. [`None`] is returned if any
/// intermediate amount overflows.
#[must_use]
pub fn calculate_final_price<R: AsRef<Terms>>(
    sorted_rules: &[R],
    start_date: Date,
    end_date: Date,
    stay_length: StayLength,
    base_price: Price,
) -> Option<Price> {
    let mut final_price = Price::ZERO;
    let mut effective_days = stay_length.days();
    let mut specific_day_applied = false;

    for rule in sorted_rules {
        let terms: &Terms = rule.as_ref();

        if let Some((day, fixed_price)) = terms.specific_day_price() {
            if (start_date..=end_date).contains(&day) {
                final_price = final_price.checked_add(fixed_price)?;
                effective_days -= 1;
                specific_day_applied = true;
            }
        }

        if let Some((min_stay_length, modifier)) = terms.threshold() {
            if stay_length >= min_stay_length {
                let adjusted =
                    modifier.apply(base_price.checked_mul(effective_days)?)?;
                if specific_day_applied {
                    final_price = final_price.checked_add(adjusted)?;
                } else {
                    final_price = adjusted;
                }
            }
        }
    }

    if final_price.is_zero()
        && stay_length.days() > 0
        && base_price.is_positive()
    {
        final_price = base_price.checked_mul(stay_length.days())?;
    }

    Some(final_price.round())
}

/// Computes a [`Quote`] for a stay from `start_date` to `end_date` (both
/// inclusive) with the provided `rules` in any order.
///
/// Returns [`None`] if the final price overflows.
#[must_use]
pub fn quote<R: AsRef<Terms>>(
    rules: Vec<R>,
    start_date: Date,
    end_date: Date,
    base_price: Price,
) -> Option<Quote> {
    let rules = sort_rules(rules);
    let stay_length = calculate_stay_length(start_date, end_date);
    let final_price = calculate_final_price(
        &rules,
        start_date,
        end_date,
        stay_length,
        base_price,
    )?;
    Some(Quote {
        stay_length,
        final_price,
    })
}
