use std::collections::HashSet;

use thiserror::Error;

use super::{ClockBinding, Config};

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// The same zone id is offered twice by the selector.
    #[error("zone '{id}' is listed more than once")]
    DuplicateZone { id: String },

    /// The initial selection is not one of the selectable zones.
    #[error("initial zone '{id}' is not in the zone list")]
    InitialZoneNotListed { id: String },

    /// Two clocks share a name.
    #[error("duplicate clock definition for '{name}'")]
    DuplicateClock { name: String },

    /// No clock is configured at all.
    #[error("at least one clock must be configured")]
    NoClocks,

    /// A clock or zone entry names an empty zone id.
    #[error("clock '{name}' has an empty zone id")]
    EmptyZone { name: String },
}

impl Config {
    /// Validates the structural consistency of the configuration.
    ///
    /// Zone ids are only checked for shape here; whether they exist in the tz
    /// database is decided by the core crate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] on duplicate zones or clocks, an
    /// unlisted initial zone, or an empty clock list.
    ///
    /// # Examples
    ///
    /// ```
    /// use tzclock_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut seen_zones = HashSet::new();

        for zone in &self.zones {
            if !seen_zones.insert(zone.as_str()) {
                return Err(ConfigValidationError::DuplicateZone { id: zone.clone() });
            }
        }

        if !seen_zones.contains(self.initial_zone.as_str()) {
            return Err(ConfigValidationError::InitialZoneNotListed {
                id: self.initial_zone.clone(),
            });
        }

        if self.clocks.is_empty() {
            return Err(ConfigValidationError::NoClocks);
        }

        let mut seen_clocks = HashSet::new();

        for clock in &self.clocks {
            if !seen_clocks.insert(clock.name.as_str()) {
                return Err(ConfigValidationError::DuplicateClock {
                    name: clock.name.clone(),
                });
            }

            if let ClockBinding::Fixed(id) = &clock.zone
                && id.trim().is_empty()
            {
                return Err(ConfigValidationError::EmptyZone {
                    name: clock.name.clone(),
                });
            }
        }

        Ok(())
    }
}
