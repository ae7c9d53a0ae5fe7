//! The in-memory garage: spots, vehicle records and occupancy state.
//!
//! [`Garage`] is the stateful shell around the pure pieces - the
//! allocator, the pricing calculator, the search interpreter and the
//! overview selector. It owns the spot list, the parked-vehicle records
//! and the occupancy records, and guarantees the one contract the pure
//! engine cannot enforce on its own: per vehicle, either *all* required
//! occupancy records exist or *none* do.
//!
//! Allocation works on a snapshot of current usage and then writes; both
//! steps happen under the same `&mut self` borrow, so attempts are
//! serialized and cannot interleave on stale counts. The commit still
//! re-verifies the capacity invariant against live occupancy right before
//! writing.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rust_decimal::Decimal;
//! use rs_garage::{Garage, GarageConfig, ParkError, VehicleDetails, VehicleType};
//!
//! let mut garage = Garage::new(GarageConfig::new(Decimal::from(15)).with_spot_count(2)).unwrap();
//! let now = Utc.with_ymd_and_hms(2025, 12, 17, 13, 0, 0).unwrap();
//!
//! // A boat needs 3 consecutive empty spots; this garage only has 2.
//! let boat = VehicleDetails::new("BOAT01", "Nimbus", "T9", "White", 0, VehicleType::Boat).unwrap();
//! assert!(matches!(garage.park(boat, now), Err(ParkError::NoSpace(_))));
//!
//! // Motorcycles pack into the most-used spot before opening a fresh one.
//! let mc1 = VehicleDetails::new("JKL321", "Yamaha", "MT-07", "Black", 2, VehicleType::Motorcycle).unwrap();
//! let mc2 = VehicleDetails::new("MNO654", "Honda", "CBR600RR", "Blue", 2, VehicleType::Motorcycle).unwrap();
//! garage.park(mc1, now).unwrap();
//! garage.park(mc2, now).unwrap();
//!
//! let usage = garage.usage_snapshot();
//! assert_eq!(usage[0].used_units, 2); // both on spot 1
//! assert_eq!(usage[1].used_units, 0); // spot 2 untouched
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::allocation::{allocate, AllocationError, Placement};
use crate::config::{ConfigError, GarageConfig};
use crate::overview::{paginate, sort_rows, OverviewItem, OverviewPage, OverviewSortBy};
use crate::pricing::{price, PricingError};
use crate::search::SearchFilter;
use crate::spot::{usage_snapshot, units_used_by, ParkingSpot, SpotUsage, VehicleSpot};
use crate::stats::GarageStatistics;
use crate::vehicle::{ParkedVehicle, Registration, VehicleDetails, VehicleEdit, VehicleType};

// ============================================================================
// Errors and receipts
// ============================================================================

/// Why a park request was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParkError {
    /// Another parked vehicle already carries this registration.
    #[error("a vehicle with registration number {0} is already parked in this garage")]
    RegistrationInUse(Registration),

    /// The allocator found no suitable spot or spot run.
    #[error(transparent)]
    NoSpace(#[from] AllocationError),
}

/// Why a checkout failed. Nothing is removed on failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnparkError {
    /// No parked vehicle has this id.
    #[error("no parked vehicle with id {0}")]
    VehicleNotFound(u32),

    /// The price could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Why an edit of a parked vehicle was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// No parked vehicle has this id.
    #[error("no parked vehicle with id {0}")]
    VehicleNotFound(u32),

    /// Another parked vehicle already carries the new registration.
    #[error("a vehicle with registration number {0} is already parked in this garage")]
    RegistrationInUse(Registration),
}

/// Checkout receipt returned by [`Garage::unpark`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Registration of the departed vehicle.
    pub registration: Registration,
    /// Its vehicle type.
    pub vehicle_type: VehicleType,
    /// When it arrived.
    pub arrival_time: DateTime<Utc>,
    /// When it checked out.
    pub checkout_time: DateTime<Utc>,
    /// Total time parked.
    pub duration: TimeDelta,
    /// Amount owed.
    pub price: Decimal,
}

// ============================================================================
// Garage
// ============================================================================

/// In-memory garage state and operations.
///
/// All time-dependent operations take `now` as a parameter; the garage
/// never reads the wall clock itself.
#[derive(Clone, Debug)]
pub struct Garage {
    config: GarageConfig,
    spots: Vec<ParkingSpot>,
    vehicles: Vec<ParkedVehicle>,
    occupancy: Vec<VehicleSpot>,
    next_vehicle_id: u32,
}

impl Garage {
    /// Build a garage with spots numbered `1..=spot_count`.
    pub fn new(config: GarageConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let spots = (1..=config.spot_count).map(ParkingSpot::new).collect();
        Ok(Self {
            config,
            spots,
            vehicles: Vec::new(),
            occupancy: Vec::new(),
            next_vehicle_id: 1,
        })
    }

    /// The configuration the garage was built with.
    pub fn config(&self) -> &GarageConfig {
        &self.config
    }

    /// The physical spots, in spot-number order.
    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    /// All parked vehicles, in arrival order.
    pub fn vehicles(&self) -> &[ParkedVehicle] {
        &self.vehicles
    }

    /// Number of parked vehicles.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Look up a parked vehicle by record id.
    pub fn vehicle(&self, vehicle_id: u32) -> Option<&ParkedVehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }

    /// Look up a parked vehicle by registration (any casing).
    pub fn find_by_registration(&self, registration: &str) -> Option<&ParkedVehicle> {
        let registration = Registration::parse(registration).ok()?;
        self.vehicles.iter().find(|v| v.registration == registration)
    }

    /// Current per-spot usage, derived from the live occupancy records.
    pub fn usage_snapshot(&self) -> Vec<SpotUsage> {
        usage_snapshot(&self.spots, &self.occupancy)
    }

    /// Park a vehicle: allocate spot(s) and create the records.
    ///
    /// The vehicle record and all its occupancy records are created
    /// together; on any error nothing is written, so a vehicle can never
    /// exist without its placement.
    pub fn park(&mut self, details: VehicleDetails, now: DateTime<Utc>) -> Result<u32, ParkError> {
        if self
            .vehicles
            .iter()
            .any(|v| v.registration == details.registration)
        {
            return Err(ParkError::RegistrationInUse(details.registration));
        }

        let snapshot = self.usage_snapshot();
        let placement = match allocate(details.vehicle_type, &snapshot) {
            Ok(placement) => placement,
            Err(err) => {
                warn!(
                    "no parking slots available for {} ({})",
                    details.registration, details.vehicle_type
                );
                return Err(err.into());
            }
        };
        debug!(
            "placing {} on spot(s) {:?}",
            details.registration,
            placement
                .assignments
                .iter()
                .map(|a| a.spot_number)
                .collect::<Vec<_>>()
        );

        let vehicle_id = self.next_vehicle_id;
        self.commit_placement(vehicle_id, &placement)?;
        self.vehicles
            .push(ParkedVehicle::from_details(vehicle_id, details, now));
        self.next_vehicle_id += 1;

        let vehicle = &self.vehicles[self.vehicles.len() - 1];
        info!(
            "parked {} ({}) across {} spot(s)",
            vehicle.registration,
            vehicle.vehicle_type,
            placement.assignments.len()
        );
        Ok(vehicle_id)
    }

    /// Check a vehicle out: compute the price, then remove the vehicle and
    /// all of its occupancy records together.
    pub fn unpark(&mut self, vehicle_id: u32, now: DateTime<Utc>) -> Result<Receipt, UnparkError> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.id == vehicle_id)
            .ok_or(UnparkError::VehicleNotFound(vehicle_id))?;

        let vehicle = &self.vehicles[index];
        let units_used = units_used_by(vehicle, &self.occupancy);
        let amount = price(
            vehicle.arrival_time,
            now,
            units_used,
            self.config.price_per_hour,
        )?;

        let receipt = Receipt {
            registration: vehicle.registration.clone(),
            vehicle_type: vehicle.vehicle_type,
            arrival_time: vehicle.arrival_time,
            checkout_time: now,
            duration: now - vehicle.arrival_time,
            price: amount,
        };

        self.occupancy.retain(|record| record.vehicle_id != vehicle_id);
        self.vehicles.remove(index);

        info!(
            "checked out {} after {} minute(s), owing {}",
            receipt.registration,
            receipt.duration.num_minutes(),
            receipt.price
        );
        Ok(receipt)
    }

    /// Edit a parked vehicle's descriptive attributes.
    ///
    /// The vehicle type and its placement stay fixed for the whole stay.
    pub fn update_vehicle(&mut self, vehicle_id: u32, edit: VehicleEdit) -> Result<(), UpdateError> {
        if self
            .vehicles
            .iter()
            .any(|v| v.id != vehicle_id && v.registration == edit.registration)
        {
            return Err(UpdateError::RegistrationInUse(edit.registration));
        }

        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|v| v.id == vehicle_id)
            .ok_or(UpdateError::VehicleNotFound(vehicle_id))?;

        debug!("updating vehicle {}", vehicle.id);
        vehicle.apply_edit(edit);
        Ok(())
    }

    /// The overview list: search, then sort, then slice one page.
    pub fn overview(
        &self,
        query: Option<&str>,
        sort_by: Option<OverviewSortBy>,
        page: usize,
        now: DateTime<Utc>,
    ) -> OverviewPage {
        let filter = SearchFilter::parse(query);
        let mut rows: Vec<OverviewItem> = filter
            .apply(&self.vehicles)
            .into_iter()
            .map(|vehicle| OverviewItem::from_vehicle(vehicle, now))
            .collect();

        sort_rows(&mut rows, sort_by);
        paginate(rows, page)
    }

    /// Garage-wide statistics as of `now`.
    pub fn statistics(&self, now: DateTime<Utc>) -> GarageStatistics {
        GarageStatistics::compute(&self.vehicles, self.config.price_per_hour, now)
    }

    /// Write the occupancy records for one placement, all or nothing.
    ///
    /// The capacity invariant is re-verified against live occupancy
    /// immediately before the records are created; no record is written
    /// unless every assignment fits.
    fn commit_placement(
        &mut self,
        vehicle_id: u32,
        placement: &Placement,
    ) -> Result<(), AllocationError> {
        let snapshot = self.usage_snapshot();
        for assignment in &placement.assignments {
            let fits = snapshot.iter().any(|usage| {
                usage.spot_number == assignment.spot_number
                    && usage.free_units() >= assignment.units_used
            });
            if !fits {
                return Err(AllocationError::NoSpaceAvailable);
            }
        }

        for assignment in &placement.assignments {
            self.occupancy.push(VehicleSpot {
                vehicle_id,
                spot_number: assignment.spot_number,
                units_used: assignment.units_used,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
