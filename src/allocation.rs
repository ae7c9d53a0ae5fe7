//! Spot allocation strategies for arriving vehicles.
//!
//! Given a vehicle type and a fresh [`SpotUsage`] snapshot, [`allocate`]
//! decides which spot(s) the vehicle occupies. The decision is pure: it
//! either returns a non-empty [`Placement`] for the caller to persist, or
//! an explicit [`AllocationError::NoSpaceAvailable`] with nothing written.
//!
//! # Strategies
//!
//! One strategy per vehicle type, dispatched by a single exhaustive match:
//!
//! - **Motorcycle** - among spots with at least one free unit, take the
//!   spot with the *most* already-used units (lowest spot number on ties).
//!   Partially filled spots are packed before a fresh one is opened, so up
//!   to three motorcycles end up sharing a spot.
//! - **Car** - first-fit: the lowest-numbered entirely empty spot. A car
//!   never shares a spot, even one with a single unit taken.
//! - **Bus / Boat** - a run of 2 / 3 entirely empty spots with consecutive
//!   spot numbers, the lowest-starting such run. Every spot in the run is
//!   claimed whole ([`FULL_SPOT_UNITS`] each); runs never wrap around from
//!   the highest spot number back to 1.
//!
//! # Example
//!
//! ```rust
//! use rs_garage::{allocate, SpotUsage, VehicleType};
//!
//! let snapshot = vec![
//!     SpotUsage { spot_number: 1, capacity_units: 3, used_units: 1 },
//!     SpotUsage { spot_number: 2, capacity_units: 3, used_units: 0 },
//! ];
//!
//! // The motorcycle joins the partially used spot 1 rather than opening spot 2.
//! let placement = allocate(VehicleType::Motorcycle, &snapshot).unwrap();
//! assert_eq!(placement.assignments[0].spot_number, 1);
//! assert_eq!(placement.assignments[0].units_used, 1);
//! ```

use core::cmp::Reverse;

use crate::spot::{SpotUsage, FULL_SPOT_UNITS};
use crate::vehicle::VehicleType;

// ============================================================================
// Placement
// ============================================================================

/// One spot claimed for a vehicle, with the units it takes there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotAssignment {
    /// The spot to claim.
    pub spot_number: u32,
    /// Units of that spot the vehicle takes, 1..=3.
    pub units_used: u8,
}

/// The non-empty set of assignments produced by one allocation decision.
///
/// All assignments are persisted together or not at all; a vehicle record
/// must never exist without its placement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// The claimed spots, in ascending spot-number order.
    pub assignments: Vec<SpotAssignment>,
}

impl Placement {
    /// Total units claimed across all assignments.
    pub fn total_units(&self) -> u32 {
        self.assignments
            .iter()
            .map(|a| u32::from(a.units_used))
            .sum()
    }
}

/// Why an allocation attempt produced no placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// No spot or spot run satisfies the vehicle's requirement.
    #[error("no parking slots available for this vehicle")]
    NoSpaceAvailable,
}

// ============================================================================
// Allocation
// ============================================================================

/// Decide which spot(s) a vehicle of the given type occupies.
///
/// `snapshot` must cover every existing spot with usage derived from the
/// current occupancy records (see [`usage_snapshot`]); its order does not
/// matter. On rejection nothing has been decided and the caller must not
/// create the vehicle record.
///
/// [`usage_snapshot`]: crate::spot::usage_snapshot
pub fn allocate(
    vehicle_type: VehicleType,
    snapshot: &[SpotUsage],
) -> Result<Placement, AllocationError> {
    match vehicle_type {
        VehicleType::Motorcycle => allocate_shared_unit(snapshot, vehicle_type.units_required()),
        VehicleType::Car => allocate_whole_spot(snapshot, vehicle_type.units_required()),
        VehicleType::Bus | VehicleType::Boat => {
            allocate_consecutive_run(snapshot, usize::from(vehicle_type.spots_required()))
        }
    }
}

/// Fill partially used spots before opening an empty one.
fn allocate_shared_unit(snapshot: &[SpotUsage], units: u8) -> Result<Placement, AllocationError> {
    let chosen = snapshot
        .iter()
        .filter(|s| s.free_units() >= units)
        .max_by_key(|s| (s.used_units, Reverse(s.spot_number)))
        .ok_or(AllocationError::NoSpaceAvailable)?;

    Ok(Placement {
        assignments: vec![SpotAssignment {
            spot_number: chosen.spot_number,
            units_used: units,
        }],
    })
}

/// First-fit over entirely empty spots, by ascending spot number.
fn allocate_whole_spot(snapshot: &[SpotUsage], units: u8) -> Result<Placement, AllocationError> {
    let chosen = snapshot
        .iter()
        .filter(|s| s.is_empty() && s.capacity_units >= units)
        .min_by_key(|s| s.spot_number)
        .ok_or(AllocationError::NoSpaceAvailable)?;

    Ok(Placement {
        assignments: vec![SpotAssignment {
            spot_number: chosen.spot_number,
            units_used: units,
        }],
    })
}

/// Lowest-starting run of `run_len` empty spots with consecutive numbers.
fn allocate_consecutive_run(
    snapshot: &[SpotUsage],
    run_len: usize,
) -> Result<Placement, AllocationError> {
    let mut empty: Vec<&SpotUsage> = snapshot.iter().filter(|s| s.is_empty()).collect();
    empty.sort_by_key(|s| s.spot_number);

    let run = empty
        .windows(run_len)
        .find(|window| is_consecutive(window))
        .ok_or(AllocationError::NoSpaceAvailable)?;

    Ok(Placement {
        assignments: run
            .iter()
            .map(|s| SpotAssignment {
                spot_number: s.spot_number,
                units_used: FULL_SPOT_UNITS,
            })
            .collect(),
    })
}

fn is_consecutive(window: &[&SpotUsage]) -> bool {
    window
        .windows(2)
        .all(|pair| pair[1].spot_number == pair[0].spot_number + 1)
}

// ============================================================================
// Tests
// ============================================================================
