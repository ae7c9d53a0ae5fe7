//! Ordering and pagination of the active-vehicle list.
//!
//! The overview shows one [`OverviewItem`] row per parked vehicle, ordered
//! by an optional [`OverviewSortBy`] key and sliced into fixed-size pages
//! of [`PAGE_SIZE`] rows.
//!
//! Sorting by parked time is expressed as *descending arrival time*, a
//! derived ordering over the arrival timestamps; the duration values
//! themselves are never compared.
//!
//! Pages are 1-based. A page past the end yields an empty slice rather
//! than an error, and page 0 is treated as the first page.

use chrono::{DateTime, TimeDelta, Utc};

use crate::vehicle::{ParkedVehicle, Registration, VehicleType};

/// Rows per overview page.
pub const PAGE_SIZE: usize = 10;

/// Sort key for the overview list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverviewSortBy {
    /// Registration number, ascending.
    RegistrationNumber,
    /// Arrival time, oldest first.
    ArrivalTime,
    /// Vehicle type, in declaration order.
    Type,
    /// Descending arrival time (most recent arrival first).
    ParkedTime,
}

/// One row of the overview list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverviewItem {
    /// Vehicle record id.
    pub id: u32,
    /// Registration number.
    pub registration: Registration,
    /// Vehicle type.
    pub vehicle_type: VehicleType,
    /// When the vehicle arrived.
    pub arrival_time: DateTime<Utc>,
    /// How long the vehicle has been parked, relative to the supplied now.
    pub parked_duration: TimeDelta,
}

impl OverviewItem {
    /// Build a row for a parked vehicle as of `now`.
    pub fn from_vehicle(vehicle: &ParkedVehicle, now: DateTime<Utc>) -> Self {
        Self {
            id: vehicle.id,
            registration: vehicle.registration.clone(),
            vehicle_type: vehicle.vehicle_type,
            arrival_time: vehicle.arrival_time,
            parked_duration: now - vehicle.arrival_time,
        }
    }
}

/// An ordered, paginated slice of the overview list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverviewPage {
    /// The rows of the requested page (at most [`PAGE_SIZE`]).
    pub rows: Vec<OverviewItem>,
    /// The requested page number (1-based).
    pub page: usize,
    /// Total number of pages for the filtered row set.
    pub total_pages: usize,
    /// Total number of filtered rows across all pages.
    pub total_rows: usize,
}

/// Sort rows in place by the given key; `None` preserves the input order.
pub fn sort_rows(rows: &mut [OverviewItem], sort_by: Option<OverviewSortBy>) {
    match sort_by {
        Some(OverviewSortBy::RegistrationNumber) => {
            rows.sort_by(|a, b| a.registration.cmp(&b.registration));
        }
        Some(OverviewSortBy::ArrivalTime) => {
            rows.sort_by_key(|row| row.arrival_time);
        }
        Some(OverviewSortBy::Type) => {
            rows.sort_by_key(|row| row.vehicle_type);
        }
        Some(OverviewSortBy::ParkedTime) => {
            rows.sort_by(|a, b| b.arrival_time.cmp(&a.arrival_time));
        }
        None => {}
    }
}

/// Slice ordered rows into the requested 1-based page.
pub fn paginate(rows: Vec<OverviewItem>, page: usize) -> OverviewPage {
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(PAGE_SIZE);
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);

    let rows = rows.into_iter().skip(start).take(PAGE_SIZE).collect();

    OverviewPage {
        rows,
        page,
        total_pages,
        total_rows,
    }
}

// ============================================================================
// Tests
// ============================================================================
