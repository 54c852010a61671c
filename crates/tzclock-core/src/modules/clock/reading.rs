use std::fmt::Display;

use chrono::{
    DateTime, Local, Locale, TimeZone, Timelike, Utc,
    format::{Item, StrftimeItems},
};
use thiserror::Error;
use tzclock_proto::config::FormatConfig;

use crate::zone::ZoneId;

/// Errors raised while preparing the readout formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown locale '{locale}'")]
    UnknownLocale { locale: String },

    #[error("invalid {field} format '{pattern}'")]
    InvalidPattern {
        field:   &'static str,
        pattern: String,
    },
}

/// Validated strftime patterns and locale for the digital and date readouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingFormats {
    time:   String,
    date:   String,
    locale: Locale,
}

impl ReadingFormats {
    /// # Errors
    ///
    /// Returns [`FormatError`] when the locale is unknown to chrono or a pattern
    /// contains an unsupported specifier.
    pub fn new(time: &str, date: &str, locale: &str) -> Result<Self, FormatError> {
        let locale = Locale::try_from(locale).map_err(|_| FormatError::UnknownLocale {
            locale: locale.to_owned(),
        })?;

        Ok(Self {
            time: Self::checked("time", time)?,
            date: Self::checked("date", date)?,
            locale,
        })
    }

    pub fn from_config(config: &FormatConfig) -> Result<Self, FormatError> {
        Self::new(&config.time, &config.date, &config.locale)
    }

    fn checked(field: &'static str, pattern: &str) -> Result<String, FormatError> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::InvalidPattern {
                field,
                pattern: pattern.to_owned(),
            });
        }

        Ok(pattern.to_owned())
    }
}

impl Default for ReadingFormats {
    fn default() -> Self {
        Self {
            time:   "%H:%M:%S".to_owned(),
            date:   "%Y/%m/%d(%a)".to_owned(),
            locale: Locale::ja_JP,
        }
    }
}

/// Wall-clock decomposition of an instant in one zone, plus its readouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    pub hours:        u32,
    pub minutes:      u32,
    pub seconds:      u32,
    pub milliseconds: u32,
    pub time_string:  String,
    pub date_string:  String,
}

impl ClockReading {
    /// Reads `instant` on the wall clock of `zone`.
    ///
    /// Named zones go through the tz database so daylight-saving rules apply;
    /// no offset arithmetic happens here.
    pub fn at(zone: ZoneId, instant: DateTime<Utc>, formats: &ReadingFormats) -> Self {
        match zone {
            ZoneId::Local => Self::from_wall(&instant.with_timezone(&Local), formats),
            ZoneId::Named(tz) => Self::from_wall(&instant.with_timezone(&tz), formats),
        }
    }

    fn from_wall<T>(wall: &DateTime<T>, formats: &ReadingFormats) -> Self
    where
        T: TimeZone,
        T::Offset: Display,
    {
        Self {
            hours:        wall.hour(),
            minutes:      wall.minute(),
            seconds:      wall.second(),
            // leap seconds report up to 1999 ms
            milliseconds: wall.timestamp_subsec_millis().min(999),
            time_string:  wall.format_localized(&formats.time, formats.locale).to_string(),
            date_string:  wall.format_localized(&formats.date, formats.locale).to_string(),
        }
    }
}

/// Hand rotations in degrees, clockwise from 12 o'clock, each in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandAngles {
    pub hour:   f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    /// Continuous (sweeping) hand positions for a reading.
    pub fn from_reading(reading: &ClockReading) -> Self {
        let seconds = f64::from(reading.seconds) + f64::from(reading.milliseconds) / 1000.0;
        let minutes = f64::from(reading.minutes) + seconds / 60.0;
        let hours = f64::from(reading.hours % 12) + minutes / 60.0;

        Self {
            hour:   normalize(hours * 30.0),
            minute: normalize(minutes * 6.0),
            second: normalize(seconds * 6.0),
        }
    }
}

pub(crate) fn normalize(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
