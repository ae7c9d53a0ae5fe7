//! Free-text search over the parked-vehicle list.
//!
//! A query is compiled into a [`SearchFilter`] by trying an ordered list of
//! pattern matchers; the first one that recognizes the query wins:
//!
//! 1. `w(4)` / `wheels(4)` - wheel count equals the number.
//! 2. `d(2024-12-19)` / `date(2024-12-19)` - arrival calendar day equals
//!    the date (ISO `YYYY-MM-DD`; the time of day is ignored).
//! 3. `t(car)` / `type(car)` - vehicle type whose display name *contains*
//!    the text, case-insensitively (so `t(o)` matches both Motorcycle and
//!    Boat).
//! 4. Anything else - case-insensitive substring match over registration,
//!    make, model and color.
//!
//! A pattern whose captured value fails to parse (`w(lots)`, `d(soon)`) is
//! not an error; the query simply falls through to the remaining matchers
//! and ends at the substring fallback. An empty or whitespace-only query
//! compiles to [`SearchFilter::All`], which filters nothing.
//!
//! The interpreter is pure: it reads no stored state and only turns text
//! into a predicate.
//!
//! # Example
//!
//! ```rust
//! use rs_garage::SearchFilter;
//!
//! assert_eq!(SearchFilter::parse(Some("w(4)")), SearchFilter::Wheels(4));
//! assert_eq!(SearchFilter::parse(Some("  ")), SearchFilter::All);
//! assert_eq!(
//!     SearchFilter::parse(Some("volvo")),
//!     SearchFilter::Text("volvo".to_string())
//! );
//! ```

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::vehicle::{ParkedVehicle, VehicleType};

// w(4) or wheels(4) - search by number of wheels
static WHEELS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^w(?:heels)?\((\d+)\)$").expect("wheels pattern compiles"));

// d(2024-12-19) or date(2024-12-19) - search by arrival date
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^d(?:ate)?\((.+)\)$").expect("date pattern compiles"));

// t(car) or type(motorcycle) - search by vehicle type
static TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^t(?:ype)?\((.+)\)$").expect("type pattern compiles"));

/// A matcher recognizes a query and compiles it, or passes.
type Matcher = fn(&str) -> Option<SearchFilter>;

/// Pattern matchers in priority order; the substring fallback comes last
/// and always succeeds.
const MATCHERS: [Matcher; 3] = [match_wheels, match_date, match_type];

/// A compiled search query, applicable to [`ParkedVehicle`] records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchFilter {
    /// No filtering; every record matches.
    All,
    /// Wheel count equals the number.
    Wheels(u32),
    /// Arrival calendar day equals the date.
    ArrivalDate(NaiveDate),
    /// Vehicle type is one of these (display-name substring matches).
    /// May be empty, in which case nothing matches.
    Types(Vec<VehicleType>),
    /// Substring over registration, make, model and color.
    Text(String),
}

impl SearchFilter {
    /// Compile a raw query string into a filter.
    pub fn parse(query: Option<&str>) -> Self {
        let trimmed = query.unwrap_or_default().trim();
        if trimmed.is_empty() {
            return SearchFilter::All;
        }

        for matcher in MATCHERS {
            if let Some(filter) = matcher(trimmed) {
                return filter;
            }
        }

        SearchFilter::Text(trimmed.to_string())
    }

    /// Whether a vehicle record satisfies the filter.
    pub fn matches(&self, vehicle: &ParkedVehicle) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Wheels(wheels) => u32::from(vehicle.wheel_count) == *wheels,
            SearchFilter::ArrivalDate(date) => vehicle.arrival_time.date_naive() == *date,
            SearchFilter::Types(types) => types.contains(&vehicle.vehicle_type),
            SearchFilter::Text(needle) => {
                contains_ignore_case(vehicle.registration.as_str(), needle)
                    || contains_ignore_case(&vehicle.make, needle)
                    || contains_ignore_case(&vehicle.model, needle)
                    || contains_ignore_case(&vehicle.color, needle)
            }
        }
    }

    /// Filter a record list, preserving its order.
    pub fn apply<'a>(&self, vehicles: &'a [ParkedVehicle]) -> Vec<&'a ParkedVehicle> {
        vehicles.iter().filter(|v| self.matches(v)).collect()
    }
}

fn match_wheels(query: &str) -> Option<SearchFilter> {
    let captures = WHEELS_PATTERN.captures(query)?;
    // Digits that overflow (absurdly long numbers) fall through like any
    // other unparseable capture.
    captures[1].parse().ok().map(SearchFilter::Wheels)
}

fn match_date(query: &str) -> Option<SearchFilter> {
    let captures = DATE_PATTERN.captures(query)?;
    captures[1]
        .trim()
        .parse::<NaiveDate>()
        .ok()
        .map(SearchFilter::ArrivalDate)
}

fn match_type(query: &str) -> Option<SearchFilter> {
    let captures = TYPE_PATTERN.captures(query)?;
    let needle = captures[1].to_lowercase();
    let types = VehicleType::ALL
        .into_iter()
        .filter(|t| t.name().to_lowercase().contains(&needle))
        .collect();
    Some(SearchFilter::Types(types))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::VehicleDetails;
    use chrono::{TimeZone, Utc};

    fn vehicle(
        id: u32,
        registration: &str,
        make: &str,
        wheels: u8,
        vehicle_type: VehicleType,
    ) -> ParkedVehicle {
        let details =
            VehicleDetails::new(registration, make, "Model", "Red", wheels, vehicle_type).unwrap();
        let arrival = Utc.with_ymd_and_hms(2025, 12, 17, 13, 10, 10).unwrap();
        ParkedVehicle::from_details(id, details, arrival)
    }

    #[test]
    fn empty_and_missing_queries_match_everything() {
        assert_eq!(SearchFilter::parse(None), SearchFilter::All);
        assert_eq!(SearchFilter::parse(Some("")), SearchFilter::All);
        assert_eq!(SearchFilter::parse(Some("   \t ")), SearchFilter::All);

        let v = vehicle(1, "ABC123", "Volvo", 4, VehicleType::Car);
        assert!(SearchFilter::All.matches(&v));
    }

    #[test]
    fn wheels_pattern_short_and_long_form() {
        assert_eq!(SearchFilter::parse(Some("w(4)")), SearchFilter::Wheels(4));
        assert_eq!(
            SearchFilter::parse(Some("wheels(2)")),
            SearchFilter::Wheels(2)
        );
        assert_eq!(SearchFilter::parse(Some("W(4)")), SearchFilter::Wheels(4));
    }

    #[test]
    fn wheels_filters_by_count_only() {
        let car = vehicle(1, "ABC123", "Volvo", 4, VehicleType::Car);
        let motorcycle = vehicle(2, "JKL321", "Yamaha", 2, VehicleType::Motorcycle);

        let filter = SearchFilter::parse(Some("w(4)"));
        assert!(filter.matches(&car));
        assert!(!filter.matches(&motorcycle));
    }

    #[test]
    fn wheels_with_unmatched_count_matches_nothing() {
        // Recognized as a wheels query even though no vehicle has 999 wheels.
        let filter = SearchFilter::parse(Some("w(999)"));
        assert_eq!(filter, SearchFilter::Wheels(999));
        assert!(!filter.matches(&vehicle(1, "ABC123", "Volvo", 4, VehicleType::Car)));
    }

    #[test]
    fn non_numeric_wheels_falls_through_to_text() {
        assert_eq!(
            SearchFilter::parse(Some("w(lots)")),
            SearchFilter::Text("w(lots)".to_string())
        );
    }

    #[test]
    fn date_pattern_matches_calendar_day() {
        let filter = SearchFilter::parse(Some("d(2025-12-17)"));
        assert_eq!(
            filter,
            SearchFilter::ArrivalDate(NaiveDate::from_ymd_opt(2025, 12, 17).unwrap())
        );

        // Arrival is 13:10:10 on that day; the time is discarded.
        assert!(filter.matches(&vehicle(1, "ABC123", "Volvo", 4, VehicleType::Car)));

        let other_day = SearchFilter::parse(Some("date(2025-12-18)"));
        assert!(!other_day.matches(&vehicle(1, "ABC123", "Volvo", 4, VehicleType::Car)));
    }

    #[test]
    fn bad_date_falls_through_to_text() {
        assert_eq!(
            SearchFilter::parse(Some("d(tomorrow)")),
            SearchFilter::Text("d(tomorrow)".to_string())
        );
    }

    #[test]
    fn type_pattern_is_substring_of_display_name() {
        assert_eq!(
            SearchFilter::parse(Some("t(bus)")),
            SearchFilter::Types(vec![VehicleType::Bus])
        );
        assert_eq!(
            SearchFilter::parse(Some("type(CAR)")),
            SearchFilter::Types(vec![VehicleType::Car])
        );
        // "o" occurs in both "Motorcycle" and "Boat".
        assert_eq!(
            SearchFilter::parse(Some("t(o)")),
            SearchFilter::Types(vec![VehicleType::Motorcycle, VehicleType::Boat])
        );
    }

    #[test]
    fn type_pattern_with_no_match_matches_nothing() {
        let filter = SearchFilter::parse(Some("t(submarine)"));
        assert_eq!(filter, SearchFilter::Types(vec![]));
        assert!(!filter.matches(&vehicle(1, "ABC123", "Volvo", 4, VehicleType::Car)));
    }

    #[test]
    fn fallback_substring_is_case_insensitive() {
        let v = vehicle(1, "ABC123", "Volvo", 4, VehicleType::Car);

        assert!(SearchFilter::parse(Some("volvo")).matches(&v));
        assert!(SearchFilter::parse(Some("bc12")).matches(&v));
        assert!(SearchFilter::parse(Some("red")).matches(&v));
        assert!(!SearchFilter::parse(Some("tesla")).matches(&v));
    }

    #[test]
    fn apply_preserves_input_order() {
        let vehicles = vec![
            vehicle(1, "GHI789", "Tesla", 4, VehicleType::Car),
            vehicle(2, "ABC123", "Volvo", 4, VehicleType::Car),
            vehicle(3, "JKL321", "Yamaha", 2, VehicleType::Motorcycle),
        ];

        let all: Vec<u32> = SearchFilter::All
            .apply(&vehicles)
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(all, vec![1, 2, 3]);

        let cars: Vec<u32> = SearchFilter::parse(Some("w(4)"))
            .apply(&vehicles)
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(cars, vec![1, 2]);
    }

    #[test]
    fn pattern_queries_are_trimmed_first() {
        assert_eq!(
            SearchFilter::parse(Some("  w(4)  ")),
            SearchFilter::Wheels(4)
        );
    }
}
