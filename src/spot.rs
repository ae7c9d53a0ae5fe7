//! Parking spots, occupancy records and derived capacity usage.
//!
//! Every spot holds [`SPOT_CAPACITY_UNITS`] capacity units (thirds of a
//! standard car-sized space). Which vehicle stands where is tracked by
//! [`VehicleSpot`] records linking one vehicle to one spot with a
//! units-used value; a bus or boat produces one such record per occupied
//! spot.
//!
//! Used and free units are never stored on the spot itself. They are
//! derived from the live occupancy records via [`usage_snapshot`] at the
//! start of every allocation attempt, so no allocation decision trusts a
//! count from an earlier attempt.

use crate::vehicle::ParkedVehicle;

/// Capacity of every spot, in units.
pub const SPOT_CAPACITY_UNITS: u8 = 3;

/// Units recorded for a whole-spot occupancy (bus/boat spots).
pub const FULL_SPOT_UNITS: u8 = 3;

// ============================================================================
// Spots and occupancy records
// ============================================================================

/// A physical parking spot.
///
/// The spot number is stable and unique; the capacity never changes after
/// creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkingSpot {
    /// Stable spot number, 1..=N.
    pub spot_number: u32,
    /// Total capacity in units.
    pub capacity_units: u8,
}

impl ParkingSpot {
    /// Create a spot with the standard capacity.
    pub fn new(spot_number: u32) -> Self {
        Self {
            spot_number,
            capacity_units: SPOT_CAPACITY_UNITS,
        }
    }
}

/// One vehicle's claim on one spot.
///
/// A given (vehicle, spot) pair appears at most once; all records for a
/// vehicle are removed together when it checks out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpot {
    /// The parked vehicle holding the claim.
    pub vehicle_id: u32,
    /// The occupied spot.
    pub spot_number: u32,
    /// Units of the spot taken by this vehicle, 1..=3.
    pub units_used: u8,
}

// ============================================================================
// Derived usage
// ============================================================================

/// Per-spot usage at one point in time.
///
/// This is the snapshot the allocator works from: spot identity, total
/// capacity and the units currently claimed by occupancy records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotUsage {
    /// Stable spot number.
    pub spot_number: u32,
    /// Total capacity in units.
    pub capacity_units: u8,
    /// Units claimed by current occupancy records.
    pub used_units: u8,
}

impl SpotUsage {
    /// Units still available on this spot.
    pub fn free_units(&self) -> u8 {
        self.capacity_units.saturating_sub(self.used_units)
    }

    /// True when no occupancy record touches this spot.
    pub fn is_empty(&self) -> bool {
        self.used_units == 0
    }
}

/// Recompute per-spot usage from the current occupancy records.
///
/// Spots without records report zero used units. The result is ordered
/// like `spots`.
pub fn usage_snapshot(spots: &[ParkingSpot], occupancy: &[VehicleSpot]) -> Vec<SpotUsage> {
    spots
        .iter()
        .map(|spot| {
            let used_units = occupancy
                .iter()
                .filter(|record| record.spot_number == spot.spot_number)
                .map(|record| record.units_used)
                .sum();
            SpotUsage {
                spot_number: spot.spot_number,
                capacity_units: spot.capacity_units,
                used_units,
            }
        })
        .collect()
}

/// Sum of units claimed by one vehicle across all its occupancy records.
pub fn units_used_by(vehicle: &ParkedVehicle, occupancy: &[VehicleSpot]) -> u32 {
    occupancy
        .iter()
        .filter(|record| record.vehicle_id == vehicle.id)
        .map(|record| u32::from(record.units_used))
        .sum()
}

// ============================================================================
// Tests
// ============================================================================
