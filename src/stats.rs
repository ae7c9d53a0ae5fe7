//! Aggregate statistics over the parked-vehicle list.
//!
//! Totals for the statistics page: vehicle and wheel counts, a per-type
//! breakdown, and the revenue the garage would collect if every vehicle
//! checked out right now. Revenue uses the exact fractional hours parked
//! (not the per-started-hour checkout rounding) and is rounded to a whole
//! currency amount for display.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::vehicle::{ParkedVehicle, VehicleType};

/// Milliseconds per hour, for fractional-hour revenue accounting.
const MS_PER_HOUR: i64 = 3_600_000;

/// Count of parked vehicles of one type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeCount {
    /// The vehicle type.
    pub vehicle_type: VehicleType,
    /// How many of that type are parked.
    pub count: usize,
}

/// Garage-wide statistics at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GarageStatistics {
    /// Number of parked vehicles.
    pub total_vehicles: usize,
    /// Sum of wheel counts across parked vehicles.
    pub total_wheels: u32,
    /// Per-type counts, in type order; types with no vehicles are omitted.
    pub vehicles_per_type: Vec<TypeCount>,
    /// Projected revenue if everything checked out at `now`, rounded to a
    /// whole amount.
    pub total_revenue: Decimal,
}

impl GarageStatistics {
    /// Compute statistics for the given vehicles as of `now`.
    pub fn compute(
        vehicles: &[ParkedVehicle],
        rate_per_hour: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        let total_vehicles = vehicles.len();
        let total_wheels = vehicles.iter().map(|v| u32::from(v.wheel_count)).sum();

        let vehicles_per_type = VehicleType::ALL
            .into_iter()
            .map(|vehicle_type| TypeCount {
                vehicle_type,
                count: vehicles
                    .iter()
                    .filter(|v| v.vehicle_type == vehicle_type)
                    .count(),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        let total_ms: i64 = vehicles
            .iter()
            .map(|v| (now - v.arrival_time).num_milliseconds())
            .sum();
        let total_hours = Decimal::from(total_ms) / Decimal::from(MS_PER_HOUR);
        let total_revenue = (total_hours * rate_per_hour).round();

        Self {
            total_vehicles,
            total_wheels,
            vehicles_per_type,
            total_revenue,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
