//! Vehicle records and the closed set of vehicle types.
//!
//! Every vehicle that enters the garage is described by a [`ParkedVehicle`]
//! record: a unique registration number, descriptive attributes, a
//! [`VehicleType`] and an arrival timestamp.
//!
//! The vehicle type determines how much parking capacity the vehicle
//! consumes. Spots are divided into thirds ("units"), so a motorcycle takes
//! a single unit while a boat takes three whole spots:
//!
//! | Type | Units | Spots |
//! |------------|-------|-------|
//! | Motorcycle | 1 | shares one spot |
//! | Car | 3 | one whole spot |
//! | Bus | 6 | 2 consecutive whole spots |
//! | Boat | 9 | 3 consecutive whole spots |
//!
//! # Example
//!
//! ```rust
//! use rs_garage::{Registration, VehicleDetails, VehicleType};
//!
//! let details = VehicleDetails::new("abc123", "Volvo", "XC60", "Red", 4, VehicleType::Car)
//!     .unwrap();
//!
//! // Registrations are normalized to uppercase
//! assert_eq!(details.registration.as_str(), "ABC123");
//! assert_eq!(VehicleType::Car.units_required(), 3);
//! ```

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use heapless::String as HString;

/// Exact length of a registration number.
pub const REGISTRATION_LEN: usize = 6;

/// Maximum length of the make, model and color fields.
pub const MAX_FIELD_LEN: usize = 100;

/// Maximum number of wheels a vehicle record may declare.
pub const MAX_WHEELS: u8 = 22;

// ============================================================================
// Vehicle type
// ============================================================================

/// The closed set of vehicle types the garage accepts.
///
/// The declaration order doubles as the display sort order for the
/// overview list. Each type maps to a fixed capacity requirement via
/// [`units_required`](Self::units_required) and
/// [`spots_required`](Self::spots_required); both are exhaustive matches,
/// so a type outside this set cannot reach the allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VehicleType {
    /// Two-wheeler occupying a single unit; up to three share one spot.
    Motorcycle,
    /// Standard vehicle occupying one whole spot, never shared.
    Car,
    /// Occupies two consecutive, entirely empty spots.
    Bus,
    /// Occupies three consecutive, entirely empty spots.
    Boat,
}

impl VehicleType {
    /// Every vehicle type, in declaration order.
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Motorcycle,
        VehicleType::Car,
        VehicleType::Bus,
        VehicleType::Boat,
    ];

    /// Total capacity units this type consumes (a spot holds 3).
    ///
    /// For buses and boats the requirement is realized as several
    /// whole-spot occupancy records of 3 units each, never a single
    /// oversized record.
    pub fn units_required(self) -> u8 {
        match self {
            VehicleType::Motorcycle => 1,
            VehicleType::Car => 3,
            VehicleType::Bus => 6,
            VehicleType::Boat => 9,
        }
    }

    /// Number of distinct spots this type occupies.
    pub fn spots_required(self) -> u8 {
        match self {
            VehicleType::Motorcycle | VehicleType::Car => 1,
            VehicleType::Bus => 2,
            VehicleType::Boat => 3,
        }
    }

    /// Display name, used by type search (`t(car)`).
    pub fn name(self) -> &'static str {
        match self {
            VehicleType::Motorcycle => "Motorcycle",
            VehicleType::Car => "Car",
            VehicleType::Bus => "Bus",
            VehicleType::Boat => "Boat",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Registration numbers
// ============================================================================

/// Backing storage for a registration number.
pub type RegString = HString<REGISTRATION_LEN>;

/// A validated registration number.
///
/// Exactly [`REGISTRATION_LEN`] ASCII alphanumeric characters, normalized
/// to uppercase on construction, so `"abc123"` and `"ABC123"` are the same
/// registration.
///
/// # Example
///
/// ```rust
/// use rs_garage::Registration;
///
/// let reg: Registration = "abc123".parse().unwrap();
/// assert_eq!(reg.as_str(), "ABC123");
///
/// assert!("AB 123".parse::<Registration>().is_err());
/// assert!("ABC1234".parse::<Registration>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registration(RegString);

impl Registration {
    /// Parse and normalize a registration number.
    pub fn parse(input: &str) -> Result<Self, VehicleError> {
        let trimmed = input.trim();
        if trimmed.len() != REGISTRATION_LEN {
            return Err(VehicleError::InvalidRegistration);
        }

        let mut normalized = RegString::new();
        for ch in trimmed.chars() {
            if !ch.is_ascii_alphanumeric() {
                return Err(VehicleError::InvalidRegistration);
            }
            // Length was checked above, so the push always fits.
            let _ = normalized.push(ch.to_ascii_uppercase());
        }

        Ok(Registration(normalized))
    }

    /// The normalized (uppercase) registration text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Registration {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Registration::parse(s)
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Validation errors
// ============================================================================

/// Why a vehicle record was rejected at construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VehicleError {
    /// Registration is not exactly 6 alphanumeric characters.
    #[error("registration number must be exactly {REGISTRATION_LEN} alphanumeric characters")]
    InvalidRegistration,

    /// A required text field was empty or whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A text field exceeded the maximum length.
    #[error("{0} must be at most {MAX_FIELD_LEN} characters")]
    FieldTooLong(&'static str),

    /// Wheel count above the supported range.
    #[error("number of wheels must be at most {MAX_WHEELS}")]
    TooManyWheels,
}

fn validate_text(name: &'static str, value: &str) -> Result<(), VehicleError> {
    if value.trim().is_empty() {
        return Err(VehicleError::EmptyField(name));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(VehicleError::FieldTooLong(name));
    }
    Ok(())
}

fn validate_wheels(wheel_count: u8) -> Result<(), VehicleError> {
    if wheel_count > MAX_WHEELS {
        return Err(VehicleError::TooManyWheels);
    }
    Ok(())
}

// ============================================================================
// Vehicle details (park request)
// ============================================================================

/// Validated description of a vehicle about to be parked.
///
/// This is the input to [`Garage::park`](crate::Garage::park); the garage
/// adds the record id and arrival timestamp when the vehicle is admitted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleDetails {
    /// Normalized registration number.
    pub registration: Registration,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Color.
    pub color: String,
    /// Number of wheels (0..=22).
    pub wheel_count: u8,
    /// Vehicle type; fixed for the vehicle's stay.
    pub vehicle_type: VehicleType,
}

impl VehicleDetails {
    /// Validate and assemble a park request.
    pub fn new(
        registration: &str,
        make: &str,
        model: &str,
        color: &str,
        wheel_count: u8,
        vehicle_type: VehicleType,
    ) -> Result<Self, VehicleError> {
        let registration = Registration::parse(registration)?;
        validate_text("make", make)?;
        validate_text("model", model)?;
        validate_text("color", color)?;
        validate_wheels(wheel_count)?;

        Ok(Self {
            registration,
            make: make.to_string(),
            model: model.to_string(),
            color: color.to_string(),
            wheel_count,
            vehicle_type,
        })
    }
}

/// Validated edit of a parked vehicle's descriptive attributes.
///
/// The vehicle type is deliberately absent: the type determines the spot
/// placement, which is fixed for the vehicle's stay.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleEdit {
    /// New registration number (uniqueness is re-checked by the garage).
    pub registration: Registration,
    /// New manufacturer.
    pub make: String,
    /// New model name.
    pub model: String,
    /// New color.
    pub color: String,
    /// New wheel count (0..=22).
    pub wheel_count: u8,
}

impl VehicleEdit {
    /// Validate and assemble an edit request.
    pub fn new(
        registration: &str,
        make: &str,
        model: &str,
        color: &str,
        wheel_count: u8,
    ) -> Result<Self, VehicleError> {
        let registration = Registration::parse(registration)?;
        validate_text("make", make)?;
        validate_text("model", model)?;
        validate_text("color", color)?;
        validate_wheels(wheel_count)?;

        Ok(Self {
            registration,
            make: make.to_string(),
            model: model.to_string(),
            color: color.to_string(),
            wheel_count,
        })
    }
}

// ============================================================================
// Parked vehicle record
// ============================================================================

/// A vehicle currently parked in the garage.
///
/// Created when a park request succeeds and destroyed at checkout; its
/// occupancy records are removed together with it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkedVehicle {
    /// Record id, unique within the garage.
    pub id: u32,
    /// Normalized registration number, unique among parked vehicles.
    pub registration: Registration,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Color.
    pub color: String,
    /// Number of wheels.
    pub wheel_count: u8,
    /// Vehicle type.
    pub vehicle_type: VehicleType,
    /// When the vehicle arrived.
    pub arrival_time: DateTime<Utc>,
}

impl ParkedVehicle {
    /// Build the stored record from a validated park request.
    pub fn from_details(id: u32, details: VehicleDetails, arrival_time: DateTime<Utc>) -> Self {
        Self {
            id,
            registration: details.registration,
            make: details.make,
            model: details.model,
            color: details.color,
            wheel_count: details.wheel_count,
            vehicle_type: details.vehicle_type,
            arrival_time,
        }
    }

    /// Apply a validated edit to the descriptive attributes.
    pub fn apply_edit(&mut self, edit: VehicleEdit) {
        self.registration = edit.registration;
        self.make = edit.make;
        self.model = edit.model;
        self.color = edit.color;
        self.wheel_count = edit.wheel_count;
    }
}

// ============================================================================
// Tests
// ============================================================================
