//! Garage configuration.
//!
//! Two values drive the engine: the hourly price for a whole spot and the
//! number of physical spots. Both can come from the environment at process
//! start, and an invalid rate is a startup failure - the pricing
//! calculator never falls back to a default.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use rs_garage::GarageConfig;
//!
//! // Use the default garage size
//! let config = GarageConfig::new(Decimal::from(15));
//! assert_eq!(config.spot_count, 30);
//!
//! // Or customize
//! let config = GarageConfig::new(Decimal::from(15)).with_spot_count(4);
//! assert!(config.validate().is_ok());
//! ```

use std::env;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;

/// Environment variable holding the hourly price for a whole spot.
pub const ENV_PRICE_PER_HOUR: &str = "GARAGE_PRICE_PER_HOUR";

/// Environment variable holding the number of spots (optional).
pub const ENV_SPOT_COUNT: &str = "GARAGE_SPOT_COUNT";

/// Number of spots when the environment does not say otherwise.
pub const DEFAULT_SPOT_COUNT: u32 = 30;

/// Why a configuration was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The hourly price is negative.
    #[error("price per hour may not be negative")]
    NegativeRate,

    /// The garage has no spots at all.
    #[error("the garage must have at least one parking spot")]
    NoSpots,
}

/// Garage configuration, validated at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GarageConfig {
    /// Price for one whole spot for one started hour.
    pub price_per_hour: Decimal,
    /// Number of physical spots, numbered 1..=spot_count.
    pub spot_count: u32,
}

impl GarageConfig {
    /// Configuration with the given rate and the default garage size.
    pub fn new(price_per_hour: Decimal) -> Self {
        Self {
            price_per_hour,
            spot_count: DEFAULT_SPOT_COUNT,
        }
    }

    /// Set the hourly price.
    pub fn with_price_per_hour(mut self, price_per_hour: Decimal) -> Self {
        self.price_per_hour = price_per_hour;
        self
    }

    /// Set the number of spots.
    pub fn with_spot_count(mut self, spot_count: u32) -> Self {
        self.spot_count = spot_count;
        self
    }

    /// Check the startup invariants: non-negative rate, at least one spot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.price_per_hour < Decimal::ZERO {
            return Err(ConfigError::NegativeRate);
        }
        if self.spot_count == 0 {
            return Err(ConfigError::NoSpots);
        }
        Ok(())
    }

    /// Load and validate the configuration from the environment.
    ///
    /// [`ENV_PRICE_PER_HOUR`] is required; [`ENV_SPOT_COUNT`] falls back
    /// to [`DEFAULT_SPOT_COUNT`]. Any missing, unparseable or invalid
    /// value is an error so a misconfigured process fails at startup.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw_price = env::var(ENV_PRICE_PER_HOUR)
            .with_context(|| format!("{ENV_PRICE_PER_HOUR} is not set"))?;
        let price_per_hour = Decimal::from_str(raw_price.trim())
            .with_context(|| format!("{ENV_PRICE_PER_HOUR} is not a decimal number"))?;

        let spot_count = match env::var(ENV_SPOT_COUNT) {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{ENV_SPOT_COUNT} is not a whole number"))?,
            Err(env::VarError::NotPresent) => DEFAULT_SPOT_COUNT,
            Err(err) => return Err(err).context(ENV_SPOT_COUNT),
        };

        let config = Self {
            price_per_hour,
            spot_count,
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_pattern() {
        let config = GarageConfig::new(Decimal::from(15))
            .with_price_per_hour(Decimal::from(20))
            .with_spot_count(4);

        assert_eq!(config.price_per_hour, Decimal::from(20));
        assert_eq!(config.spot_count, 4);
    }

    #[test]
    fn default_spot_count_matches_the_standard_garage() {
        assert_eq!(GarageConfig::new(Decimal::from(15)).spot_count, 30);
    }

    #[test]
    fn validate_accepts_zero_rate() {
        assert!(GarageConfig::new(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_rate() {
        assert_eq!(
            GarageConfig::new(Decimal::from(-10)).validate(),
            Err(ConfigError::NegativeRate)
        );
    }

    #[test]
    fn validate_rejects_empty_garage() {
        assert_eq!(
            GarageConfig::new(Decimal::from(15))
                .with_spot_count(0)
                .validate(),
            Err(ConfigError::NoSpots)
        );
    }

    // The environment is process-global; keep every from_env assertion in
    // one test so nothing races on the variables.
    #[test]
    fn from_env_reads_and_validates() {
        env::set_var(ENV_PRICE_PER_HOUR, "12.5");
        env::set_var(ENV_SPOT_COUNT, "8");
        let config = GarageConfig::from_env().unwrap();
        assert_eq!(config.price_per_hour, Decimal::from_str("12.5").unwrap());
        assert_eq!(config.spot_count, 8);

        env::remove_var(ENV_SPOT_COUNT);
        let config = GarageConfig::from_env().unwrap();
        assert_eq!(config.spot_count, DEFAULT_SPOT_COUNT);

        env::set_var(ENV_PRICE_PER_HOUR, "-3");
        assert!(GarageConfig::from_env().is_err());

        env::set_var(ENV_PRICE_PER_HOUR, "a lot");
        assert!(GarageConfig::from_env().is_err());

        env::remove_var(ENV_PRICE_PER_HOUR);
        assert!(GarageConfig::from_env().is_err());
    }
}
