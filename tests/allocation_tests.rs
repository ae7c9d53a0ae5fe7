//! Allocation strategy tests against usage snapshots

use rs_garage::{allocate, AllocationError, SpotUsage, VehicleType, SPOT_CAPACITY_UNITS};

fn usage(spot_number: u32, used_units: u8) -> SpotUsage {
    SpotUsage {
        spot_number,
        capacity_units: SPOT_CAPACITY_UNITS,
        used_units,
    }
}

fn empty_garage(spots: u32) -> Vec<SpotUsage> {
    (1..=spots).map(|i| usage(i, 0)).collect()
}

fn assigned_spots(vehicle_type: VehicleType, snapshot: &[SpotUsage]) -> Vec<u32> {
    allocate(vehicle_type, snapshot)
        .unwrap()
        .assignments
        .iter()
        .map(|a| a.spot_number)
        .collect()
}

// ============================================================================
// Motorcycle packing
// ============================================================================

#[test]
fn motorcycle_opens_first_spot_in_empty_garage() {
    assert_eq!(
        assigned_spots(VehicleType::Motorcycle, &empty_garage(5)),
        vec![1]
    );
}

#[test]
fn motorcycle_joins_the_fullest_spot_with_room() {
    let snapshot = vec![usage(1, 1), usage(2, 2), usage(3, 0)];
    assert_eq!(assigned_spots(VehicleType::Motorcycle, &snapshot), vec![2]);
}

#[test]
fn motorcycle_never_selects_a_full_spot() {
    let snapshot = vec![usage(1, 3), usage(2, 1)];
    assert_eq!(assigned_spots(VehicleType::Motorcycle, &snapshot), vec![2]);
}

#[test]
fn three_motorcycles_fill_one_spot_before_the_next_opens() {
    let mut snapshot = empty_garage(2);
    for _ in 0..3 {
        let placement = allocate(VehicleType::Motorcycle, &snapshot).unwrap();
        let assignment = placement.assignments[0];
        assert_eq!(assignment.spot_number, 1);
        snapshot[0].used_units += assignment.units_used;
    }
    assert_eq!(snapshot[0].used_units, 3);

    // The fourth motorcycle spills onto spot 2.
    assert_eq!(assigned_spots(VehicleType::Motorcycle, &snapshot), vec![2]);
}

#[test]
fn motorcycle_tie_break_is_lowest_spot_number() {
    let snapshot = vec![usage(4, 2), usage(2, 2), usage(1, 0)];
    assert_eq!(assigned_spots(VehicleType::Motorcycle, &snapshot), vec![2]);
}

// ============================================================================
// Car first-fit
// ============================================================================

#[test]
fn car_takes_lowest_empty_spot() {
    let snapshot = vec![usage(1, 3), usage(2, 0), usage(3, 0)];
    assert_eq!(assigned_spots(VehicleType::Car, &snapshot), vec![2]);
}

#[test]
fn car_skips_spot_with_one_unit_used() {
    let snapshot = vec![usage(1, 1), usage(2, 0)];
    assert_eq!(assigned_spots(VehicleType::Car, &snapshot), vec![2]);
}

#[test]
fn car_rejected_when_only_partial_spots_remain() {
    let snapshot = vec![usage(1, 1), usage(2, 2), usage(3, 1)];
    assert_eq!(
        allocate(VehicleType::Car, &snapshot),
        Err(AllocationError::NoSpaceAvailable)
    );
}

#[test]
fn car_uses_the_whole_spot() {
    let placement = allocate(VehicleType::Car, &empty_garage(1)).unwrap();
    assert_eq!(placement.assignments[0].units_used, 3);
    assert_eq!(placement.total_units(), 3);
}

// ============================================================================
// Consecutive runs (bus and boat)
// ============================================================================

#[test]
fn bus_claims_two_whole_consecutive_spots() {
    let placement = allocate(VehicleType::Bus, &empty_garage(5)).unwrap();
    let numbers: Vec<u32> = placement
        .assignments
        .iter()
        .map(|a| a.spot_number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);
    assert!(placement.assignments.iter().all(|a| a.units_used == 3));
}

#[test]
fn boat_claims_three_whole_consecutive_spots() {
    let placement = allocate(VehicleType::Boat, &empty_garage(5)).unwrap();
    assert_eq!(placement.assignments.len(), 3);
    assert_eq!(placement.total_units(), 9);
}

#[test]
fn run_search_picks_the_lowest_start() {
    // Runs 2-3 and 5-6 are free; the lower one wins for a bus.
    let snapshot = vec![
        usage(1, 3),
        usage(2, 0),
        usage(3, 0),
        usage(4, 1),
        usage(5, 0),
        usage(6, 0),
    ];
    assert_eq!(assigned_spots(VehicleType::Bus, &snapshot), vec![2, 3]);
}

#[test]
fn enough_empty_spots_but_no_run_rejects() {
    // Four empty spots, never two adjacent.
    let snapshot = vec![
        usage(1, 0),
        usage(2, 3),
        usage(3, 0),
        usage(4, 3),
        usage(5, 0),
        usage(6, 3),
        usage(7, 0),
    ];
    assert_eq!(
        allocate(VehicleType::Bus, &snapshot),
        Err(AllocationError::NoSpaceAvailable)
    );
}

#[test]
fn a_single_used_unit_breaks_a_run() {
    let mut snapshot = empty_garage(3);
    snapshot[1].used_units = 1;
    assert_eq!(
        allocate(VehicleType::Boat, &snapshot),
        Err(AllocationError::NoSpaceAvailable)
    );
}

#[test]
fn runs_do_not_wrap_around_the_garage() {
    // Spots 5 and 1 are both free, but 5-1 is not a run.
    let snapshot = vec![usage(1, 0), usage(2, 3), usage(3, 3), usage(4, 3), usage(5, 0)];
    assert_eq!(
        allocate(VehicleType::Bus, &snapshot),
        Err(AllocationError::NoSpaceAvailable)
    );
}

#[test]
fn boat_rejected_in_two_spot_garage() {
    assert_eq!(
        allocate(VehicleType::Boat, &empty_garage(2)),
        Err(AllocationError::NoSpaceAvailable)
    );
}

// ============================================================================
// Cross-cutting properties
// ============================================================================

#[test]
fn placements_never_overcommit_a_spot() {
    let snapshot = vec![usage(1, 2), usage(2, 1), usage(3, 0), usage(4, 0)];

    for vehicle_type in VehicleType::ALL {
        if let Ok(placement) = allocate(vehicle_type, &snapshot) {
            for assignment in &placement.assignments {
                let spot = snapshot
                    .iter()
                    .find(|s| s.spot_number == assignment.spot_number)
                    .unwrap();
                assert!(
                    spot.used_units + assignment.units_used <= spot.capacity_units,
                    "{vehicle_type:?} overcommitted spot {}",
                    assignment.spot_number
                );
            }
        }
    }
}

#[test]
fn placement_matches_the_unit_requirement() {
    let snapshot = empty_garage(6);
    for vehicle_type in VehicleType::ALL {
        let placement = allocate(vehicle_type, &snapshot).unwrap();
        assert_eq!(
            placement.total_units(),
            u32::from(vehicle_type.units_required()),
            "{vehicle_type:?}"
        );
        assert_eq!(
            placement.assignments.len(),
            usize::from(vehicle_type.spots_required()),
            "{vehicle_type:?}"
        );
    }
}

#[test]
fn empty_snapshot_rejects_everything() {
    for vehicle_type in VehicleType::ALL {
        assert_eq!(
            allocate(vehicle_type, &[]),
            Err(AllocationError::NoSpaceAvailable),
            "{vehicle_type:?}"
        );
    }
}
