//! # rs-garage
//!
//! A parking allocation and pricing engine for a garage whose spots are
//! divisible into thirds ("units").
//!
//! ## Features
//!
//! - **Type-specific allocation**: motorcycles pack into partially used
//!   spots, cars take the first empty spot, buses and boats claim runs of
//!   2 or 3 consecutive empty spots
//! - **Per-started-hour pricing**: elapsed time rounds up to whole hours,
//!   scaled by the capacity the vehicle held
//! - **Smart search**: `w(4)`, `d(2024-12-19)` and `t(car)` command
//!   patterns with a substring fallback over the text fields
//! - **Overview selection**: sorting by registration, arrival, type or
//!   parked time, with fixed-size pagination
//! - **All-or-nothing placement**: a vehicle record never exists without
//!   its occupancy records
//!
//! ## Architecture
//!
//! The engine itself is pure: the allocator, pricing calculator, search
//! interpreter and overview selector are side-effect-free functions over
//! the data handed to them. The [`Garage`] type is the stateful shell
//! that owns the records and drives the pure pieces:
//!
//! - `vehicle` - vehicle types, registrations and records
//! - `spot` - spots, occupancy records and derived usage snapshots
//! - `allocation` - the four type-specific placement strategies
//! - `pricing` - checkout amounts
//! - `search` - free-text queries compiled to predicates
//! - `overview` - sorting and pagination of the active-vehicle list
//! - `stats` - garage-wide totals
//! - `config` - rate and garage size, loadable from the environment
//! - `garage` - the in-memory garage tying everything together
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rust_decimal::Decimal;
//! use rs_garage::{Garage, GarageConfig, VehicleDetails, VehicleType};
//!
//! // A 4-spot garage charging 15 per spot-hour
//! let config = GarageConfig::new(Decimal::from(15)).with_spot_count(4);
//! let mut garage = Garage::new(config).unwrap();
//!
//! // Park a car
//! let arrival = Utc.with_ymd_and_hms(2025, 12, 17, 13, 0, 0).unwrap();
//! let details = VehicleDetails::new("abc123", "Volvo", "XC60", "Red", 4, VehicleType::Car)
//!     .unwrap();
//! let id = garage.park(details, arrival).unwrap();
//!
//! // 90 minutes later: 2 started hours on a whole spot
//! let departure = Utc.with_ymd_and_hms(2025, 12, 17, 14, 30, 0).unwrap();
//! let receipt = garage.unpark(id, departure).unwrap();
//! assert_eq!(receipt.price, Decimal::from(30));
//! ```

#![warn(missing_docs)]

/// Spot allocation strategies for arriving vehicles.
pub mod allocation;
/// Garage configuration: hourly rate and garage size.
pub mod config;
/// The in-memory garage tying records, allocation and pricing together.
pub mod garage;
/// Ordering and pagination of the active-vehicle list.
pub mod overview;
/// Checkout pricing.
pub mod pricing;
/// Free-text search compiled to vehicle predicates.
pub mod search;
/// Spots, occupancy records and derived capacity usage.
pub mod spot;
/// Aggregate statistics over the parked-vehicle list.
pub mod stats;
/// Vehicle records and the closed set of vehicle types.
pub mod vehicle;

// Re-exports for convenience
pub use allocation::{allocate, AllocationError, Placement, SpotAssignment};
pub use config::{
    ConfigError, GarageConfig, DEFAULT_SPOT_COUNT, ENV_PRICE_PER_HOUR, ENV_SPOT_COUNT,
};
pub use garage::{Garage, ParkError, Receipt, UnparkError, UpdateError};
pub use overview::{paginate, sort_rows, OverviewItem, OverviewPage, OverviewSortBy, PAGE_SIZE};
pub use pricing::{billed_hours, price, PricingError};
pub use search::SearchFilter;
pub use spot::{
    units_used_by, usage_snapshot, ParkingSpot, SpotUsage, VehicleSpot, FULL_SPOT_UNITS,
    SPOT_CAPACITY_UNITS,
};
pub use stats::{GarageStatistics, TypeCount};
pub use vehicle::{
    ParkedVehicle, Registration, VehicleDetails, VehicleEdit, VehicleError, VehicleType,
    MAX_FIELD_LEN, MAX_WHEELS, REGISTRATION_LEN,
};
