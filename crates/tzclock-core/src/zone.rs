use std::{collections::HashMap, fmt, str::FromStr};

use chrono_tz::Tz;
use thiserror::Error;
use tzclock_proto::config::LOCAL_ZONE_ID;

/// Built-in display names shown in clock titles and the zone selector.
const BUILTIN_LABELS: [(&str, &str); 10] = [
    (LOCAL_ZONE_ID, "ローカル時間"),
    ("UTC", "UTC"),
    ("America/New_York", "ニューヨーク"),
    ("America/Los_Angeles", "ロサンゼルス"),
    ("Europe/London", "ロンドン"),
    ("Europe/Paris", "パリ"),
    ("Asia/Tokyo", "東京"),
    ("Asia/Shanghai", "上海"),
    ("Asia/Dubai", "ドバイ"),
    ("Australia/Sydney", "シドニー"),
];

/// Errors raised while resolving or selecting a zone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    /// The id is neither `local` nor a tz database name.
    #[error("unknown timezone identifier '{id}'")]
    Unknown { id: String },

    /// The zone exists but the selector does not offer it.
    #[error("timezone '{id}' is not offered by the zone selector")]
    NotSelectable { id: String },
}

/// A zone a clock can be bound to: the host's local zone or a tz database
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZoneId {
    #[default]
    Local,
    Named(Tz),
}

impl ZoneId {
    pub const UTC: Self = Self::Named(Tz::UTC);

    /// Resolves a configuration id such as `local`, `UTC` or `Asia/Tokyo`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::Unknown`] when the id is not in the tz database.
    pub fn parse(id: &str) -> Result<Self, ZoneError> {
        if id == LOCAL_ZONE_ID {
            return Ok(Self::Local);
        }

        id.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| ZoneError::Unknown { id: id.to_owned() })
    }

    /// The id as written in configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_ZONE_ID,
            Self::Named(tz) => tz.name(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    pub fn is_utc(&self) -> bool {
        *self == Self::UTC
    }
}

impl FromStr for ZoneId {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Read-only mapping from zone to display name.
///
/// Configured labels take precedence over the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneLabels {
    overrides: HashMap<String, String>,
}

impl ZoneLabels {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Display name for `zone`, if one is known.
    pub fn get(&self, zone: ZoneId) -> Option<&str> {
        let id = zone.id();

        self.overrides.get(id).map(String::as_str).or_else(|| {
            BUILTIN_LABELS
                .iter()
                .find(|(known, _)| *known == id)
                .map(|(_, label)| *label)
        })
    }

    /// Display name for `zone`, falling back to its raw id.
    pub fn label_or_id(&self, zone: ZoneId) -> &str {
        self.get(zone).unwrap_or_else(|| zone.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_and_named_zones() {
        assert_eq!(ZoneId::parse("local"), Ok(ZoneId::Local));
        assert_eq!(ZoneId::parse("UTC"), Ok(ZoneId::UTC));
        assert_eq!(
            ZoneId::parse("Asia/Tokyo"),
            Ok(ZoneId::Named(Tz::Asia__Tokyo))
        );
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let err = ZoneId::parse("Mars/Olympus_Mons").expect_err("not a zone");
        assert_eq!(
            err,
            ZoneError::Unknown {
                id: "Mars/Olympus_Mons".to_owned()
            }
        );
    }

    #[test]
    fn id_round_trips_through_display() {
        let zone: ZoneId = "America/New_York".parse().expect("zone");
        assert_eq!(zone.to_string(), "America/New_York");
        assert_eq!(ZoneId::Local.to_string(), "local");
    }

    #[test]
    fn only_the_utc_entry_counts_as_utc() {
        assert!(ZoneId::UTC.is_utc());
        assert!(!ZoneId::Local.is_utc());
        assert!(!ZoneId::Named(Tz::Europe__London).is_utc());
    }

    #[test]
    fn builtin_labels_cover_default_zones() {
        let labels = ZoneLabels::default();
        assert_eq!(labels.get(ZoneId::Local), Some("ローカル時間"));
        assert_eq!(labels.get(ZoneId::Named(Tz::Asia__Tokyo)), Some("東京"));
        assert_eq!(labels.get(ZoneId::Named(Tz::Asia__Kolkata)), None);
    }

    #[test]
    fn configured_labels_override_builtin_ones() {
        let labels = ZoneLabels::new(HashMap::from([
            ("Asia/Tokyo".to_owned(), "Tokyo".to_owned()),
            ("Asia/Kolkata".to_owned(), "Kolkata".to_owned()),
        ]));

        assert_eq!(labels.get(ZoneId::Named(Tz::Asia__Tokyo)), Some("Tokyo"));
        assert_eq!(
            labels.label_or_id(ZoneId::Named(Tz::Asia__Kolkata)),
            "Kolkata"
        );
        assert_eq!(
            labels.label_or_id(ZoneId::Named(Tz::Africa__Nairobi)),
            "Africa/Nairobi"
        );
    }
}
