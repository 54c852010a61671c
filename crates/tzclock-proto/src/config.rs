mod appearance;
mod validation;

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, de::Visitor};

pub use appearance::{Appearance, AppearanceColor};
pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/tzclock/config.toml";

/// Identifier of the host's own timezone in configuration files.
pub const LOCAL_ZONE_ID: &str = "local";

/// Lower and upper bounds accepted for `tick_interval_ms`.
pub const TICK_INTERVAL_BOUNDS_MS: (u64, u64) = (10, 1000);

/// Which zone a configured clock follows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClockBinding {
    /// Follows the zone chosen in the selector.
    #[default]
    Selected,
    /// Always shows the given zone id.
    Fixed(String),
}

impl<'de> Deserialize<'de> for ClockBinding {
    fn deserialize<D>(deserializer: D) -> Result<ClockBinding, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ClockBindingVisitor;
        impl Visitor<'_> for ClockBindingVisitor {
            type Value = ClockBinding;
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("\"Selected\" or a timezone identifier")
            }
            fn visit_str<E>(self, value: &str) -> Result<ClockBinding, E>
            where
                E: serde::de::Error,
            {
                Ok(match value {
                    "Selected" | "selected" => ClockBinding::Selected,
                    other => ClockBinding::Fixed(other.to_string()),
                })
            }
        }
        deserializer.deserialize_str(ClockBindingVisitor)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockDef {
    pub name: String,
    #[serde(default)]
    pub zone: ClockBinding,
    #[serde(default)]
    pub show_date: bool,
}

fn default_clocks() -> Vec<ClockDef> {
    vec![
        ClockDef {
            name: "clock1".to_owned(),
            zone: ClockBinding::Selected,
            show_date: true,
        },
        ClockDef {
            name: "clock2".to_owned(),
            zone: ClockBinding::Fixed("UTC".to_owned()),
            show_date: false,
        },
    ]
}

/// Text formats for the digital and date readouts.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    #[serde(default = "default_time_format")]
    pub time: String,
    #[serde(default = "default_date_format")]
    pub date: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_time_format() -> String {
    "%H:%M:%S".to_owned()
}

fn default_date_format() -> String {
    "%Y/%m/%d(%a)".to_owned()
}

fn default_locale() -> String {
    "ja_JP".to_owned()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            time: default_time_format(),
            date: default_date_format(),
            locale: default_locale(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(
        deserialize_with = "tick_interval_deserializer",
        default = "default_tick_interval_ms"
    )]
    pub tick_interval_ms: u64,
    #[serde(default = "default_initial_zone")]
    pub initial_zone: String,
    #[serde(deserialize_with = "non_empty", default = "default_zones")]
    pub zones: Vec<String>,
    /// Extra or replacement display names keyed by zone id.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(rename = "Clock", default = "default_clocks")]
    pub clocks: Vec<ClockDef>,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub appearance: Appearance,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

fn default_tick_interval_ms() -> u64 {
    50
}

fn default_initial_zone() -> String {
    LOCAL_ZONE_ID.to_owned()
}

fn default_zones() -> Vec<String> {
    [
        LOCAL_ZONE_ID,
        "UTC",
        "America/New_York",
        "America/Los_Angeles",
        "Europe/London",
        "Europe/Paris",
        "Asia/Tokyo",
        "Asia/Shanghai",
        "Asia/Dubai",
        "Australia/Sydney",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn tick_interval_deserializer<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let v = u64::deserialize(deserializer)?;
    let (min, max) = TICK_INTERVAL_BOUNDS_MS;

    if !(min..=max).contains(&v) {
        return Err(D::Error::custom(format!(
            "Tick interval must be between {min} and {max} ms"
        )));
    }

    Ok(v)
}

fn non_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let vec = <Vec<T>>::deserialize(d)?;
    if vec.is_empty() {
        use serde::de::Error;

        Err(D::Error::custom("need non-empty"))
    } else {
        Ok(vec)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tick_interval_ms: default_tick_interval_ms(),
            initial_zone: default_initial_zone(),
            zones: default_zones(),
            labels: HashMap::new(),
            clocks: default_clocks(),
            format: FormatConfig::default(),
            appearance: Appearance::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").expect("empty config parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.zones.len(), 10);
        assert_eq!(config.tick_interval_ms, 50);
    }

    #[test]
    fn clock_binding_reads_selected_and_fixed() {
        let config: Config = toml::from_str(
            r#"
            [[Clock]]
            name = "main"
            zone = "Selected"
            show_date = true

            [[Clock]]
            name = "tokyo"
            zone = "Asia/Tokyo"
            "#,
        )
        .expect("clocks parse");

        assert_eq!(config.clocks.len(), 2);
        assert_eq!(config.clocks[0].zone, ClockBinding::Selected);
        assert_eq!(
            config.clocks[1].zone,
            ClockBinding::Fixed("Asia/Tokyo".to_owned())
        );
        assert!(!config.clocks[1].show_date);
    }

    #[test]
    fn empty_zone_list_is_rejected() {
        assert!(toml::from_str::<Config>("zones = []").is_err());
    }

    #[test]
    fn tick_interval_outside_bounds_is_rejected() {
        assert!(toml::from_str::<Config>("tick_interval_ms = 5").is_err());
        assert!(toml::from_str::<Config>("tick_interval_ms = 5000").is_err());
        assert!(toml::from_str::<Config>("tick_interval_ms = 100").is_ok());
    }

    #[test]
    fn labels_table_is_read() {
        let config: Config = toml::from_str(
            r#"
            [labels]
            "Asia/Tokyo" = "Tokyo"
            "#,
        )
        .expect("labels parse");

        assert_eq!(
            config.labels.get("Asia/Tokyo").map(String::as_str),
            Some("Tokyo")
        );
    }
}
