//! Checkout pricing.
//!
//! A stay is billed per *started* hour: the elapsed time between arrival
//! and departure is rounded up to the next whole hour, so a 61-minute stay
//! bills as 2 hours while a zero-length stay bills as 0. The hourly rate is
//! then scaled by how much capacity the vehicle held - a motorcycle on a
//! third of a spot pays a third of the rate, a boat on three whole spots
//! pays three times the rate.
//!
//! The result is an exact [`Decimal`] amount; any currency rounding beyond
//! the hour ceiling is the caller's concern.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rust_decimal::Decimal;
//! use rs_garage::pricing::price;
//!
//! let arrival = Utc.with_ymd_and_hms(2025, 12, 17, 13, 0, 0).unwrap();
//! let departure = Utc.with_ymd_and_hms(2025, 12, 17, 14, 1, 0).unwrap();
//!
//! // 61 minutes on 1 unit: 2 started hours at a third of the rate.
//! let amount = price(arrival, departure, 1, Decimal::from(15)).unwrap();
//! assert_eq!(amount, Decimal::from(2) * Decimal::from(15) / Decimal::from(3));
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use crate::spot::SPOT_CAPACITY_UNITS;

/// Nanoseconds per billable hour.
const NANOS_PER_HOUR: i64 = 3_600_000_000_000;

/// Why a price could not be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The configured hourly rate is negative.
    #[error("price per hour may not be negative")]
    NegativeRate,

    /// Departure lies before arrival.
    #[error("departure time lies before arrival time")]
    DepartureBeforeArrival,
}

/// Whole hours billed for an elapsed duration (started hours count fully).
///
/// Zero or negative durations bill zero hours; any strictly positive
/// duration bills at least one.
pub fn billed_hours(elapsed: TimeDelta) -> i64 {
    let nanos = elapsed.num_nanoseconds().unwrap_or(i64::MAX);
    if nanos <= 0 {
        0
    } else {
        nanos.saturating_add(NANOS_PER_HOUR - 1) / NANOS_PER_HOUR
    }
}

/// Compute the amount owed for a stay.
///
/// `units_used` is the sum of units across the vehicle's occupancy
/// records (1 for a motorcycle, 3 for a car, 6/9 for bus/boat).
/// `rate_per_hour` is the configured price for a whole spot for one
/// started hour and must be non-negative.
///
/// The amount is `billed_hours * rate * units / 3`, with the division
/// last so thirds stay exact as long as the numerator divides evenly.
pub fn price(
    arrival: DateTime<Utc>,
    departure: DateTime<Utc>,
    units_used: u32,
    rate_per_hour: Decimal,
) -> Result<Decimal, PricingError> {
    if rate_per_hour < Decimal::ZERO {
        return Err(PricingError::NegativeRate);
    }

    let elapsed = departure - arrival;
    if elapsed < TimeDelta::zero() {
        return Err(PricingError::DepartureBeforeArrival);
    }

    let hours = Decimal::from(billed_hours(elapsed));
    Ok(hours * rate_per_hour * Decimal::from(units_used) / Decimal::from(SPOT_CAPACITY_UNITS))
}

// ============================================================================
// Tests
// ============================================================================
