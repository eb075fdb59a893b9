//! # config.rs – Centralized Parameter Store
//!
//! This module holds all static program parameters used throughout the system,
//! together with the [LiftConfig] given at startup.
//! Keeping configuration in one place makes tuning, experimentation, and testing easier.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::error::LiftError;

//
// ──────────────────────────────────────────────────────────────
//   1. BUILDING LIMITS
// ──────────────────────────────────────────────────────────────
//

/// Lowest number of floors a building may have
pub const MIN_FLOORS: usize = 5;

/// Highest number of floors a building may have
pub const MAX_FLOORS: usize = 20;

//
// ──────────────────────────────────────────────────────────────
//   2. TIMING & INTERVALS
// ──────────────────────────────────────────────────────────────
//

/// Fallback tick while the lift is idle.
///
/// New requests wake the stepping loop directly, this only bounds how long a missed wake-up can go unnoticed.
pub const POLL_PERIOD: Duration = Duration::from_millis(50);

//
// ──────────────────────────────────────────────────────────────
//   3. LOGGING CONFIGURATION
// ──────────────────────────────────────────────────────────────
//

/// Enable/disable printing of errors
pub static PRINT_ERR_ON: AtomicBool = AtomicBool::new(true);

/// Enable/disable printing of warnings
pub static PRINT_WARN_ON: AtomicBool = AtomicBool::new(true);

/// Enable/disable printing of success messages
pub static PRINT_OK_ON: AtomicBool = AtomicBool::new(true);

/// Enable/disable printing of general info
pub static PRINT_INFO_ON: AtomicBool = AtomicBool::new(true);

//
// ──────────────────────────────────────────────────────────────
//   4. STARTUP CONFIGURATION
// ──────────────────────────────────────────────────────────────
//

/// Physical parameters of the building and the car, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftConfig {
    /// Number of floors, between [MIN_FLOORS] and [MAX_FLOORS]
    pub floor_count: usize,

    /// Distance between two adjacent floors
    pub floor_height: f64,

    /// Car speed, in floor-height units per second
    pub speed: f64,

    /// Seconds the doors stay open at a stop
    pub doors_delay: f64,
}

impl LiftConfig {
    /// Checks every parameter, in the same order the options are listed in the usage text.
    ///
    /// ## Returns
    /// [LiftError::InvalidConfiguration] describing the first bad value.
    pub fn validate(&self) -> Result<(), LiftError> {
        if !(MIN_FLOORS..=MAX_FLOORS).contains(&self.floor_count) {
            return Err(LiftError::InvalidConfiguration(format!(
                "Incorrect floor count. Must be from {} to {}.",
                MIN_FLOORS, MAX_FLOORS
            )));
        }
        check_positive("floor height", self.floor_height)?;
        check_positive("speed", self.speed)?;
        check_positive("doors delay", self.doors_delay)?;

        if Duration::try_from_secs_f64(self.floor_height / self.speed).is_err() {
            return Err(LiftError::InvalidConfiguration(
                "Incorrect speed. Floor height divided by speed is too large.".to_string(),
            ));
        }
        if Duration::try_from_secs_f64(self.doors_delay).is_err() {
            return Err(LiftError::InvalidConfiguration(
                "Incorrect doors delay. Too large.".to_string(),
            ));
        }
        Ok(())
    }

    /// Time the car needs to travel one floor, `floor_height / speed`.
    ///
    /// Only meaningful on a validated config; an unrepresentable value saturates.
    pub fn floor_pass_time(&self) -> Duration {
        Duration::try_from_secs_f64(self.floor_height / self.speed).unwrap_or(Duration::MAX)
    }

    /// How long the doors stay open before they are closed again.
    pub fn doors_delay_time(&self) -> Duration {
        Duration::try_from_secs_f64(self.doors_delay).unwrap_or(Duration::MAX)
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), LiftError> {
    // NaN fails this comparison as well
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LiftError::InvalidConfiguration(format!(
            "Incorrect {}. Must be greater than 0.",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> LiftConfig {
        LiftConfig {
            floor_count: 10,
            floor_height: 3.0,
            speed: 1.0,
            doors_delay: 1.0,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
        assert_eq!(valid().floor_pass_time(), Duration::from_secs(3));
        assert_eq!(valid().doors_delay_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_floor_count_bounds() {
        for floor_count in [MIN_FLOORS, MAX_FLOORS] {
            let config = LiftConfig { floor_count, ..valid() };
            assert!(config.validate().is_ok(), "{} floors should be accepted", floor_count);
        }
        for floor_count in [0, MIN_FLOORS - 1, MAX_FLOORS + 1] {
            let config = LiftConfig { floor_count, ..valid() };
            assert_eq!(
                config.validate(),
                Err(LiftError::InvalidConfiguration(
                    "Incorrect floor count. Must be from 5 to 20.".to_string()
                ))
            );
        }
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let bad = [0.0, -1.5, f64::NAN, f64::INFINITY];
        for value in bad {
            assert!(LiftConfig { floor_height: value, ..valid() }.validate().is_err());
            assert!(LiftConfig { speed: value, ..valid() }.validate().is_err());
            assert!(LiftConfig { doors_delay: value, ..valid() }.validate().is_err());
        }
    }

    #[test]
    fn test_error_names_the_bad_option() {
        let err = LiftConfig { doors_delay: 0.0, ..valid() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Incorrect doors delay. Must be greater than 0.");
    }

    #[test]
    fn test_unrepresentable_pass_time_rejected() {
        let config = LiftConfig {
            floor_height: 1e300,
            speed: 1e-300,
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unrepresentable_doors_delay_rejected() {
        let config = LiftConfig { doors_delay: 1e300, ..valid() };
        assert!(config.validate().is_err());
    }
}
