use chrono::{DateTime, Local, SubsecRound, Utc};

use crate::zone::ZoneId;

const UTC_LABEL: &str = "UTC+00:00";

/// Offset of `zone` from UTC at `instant`, as `UTC±HH:MM`.
pub fn offset_label(zone: ZoneId, instant: DateTime<Utc>) -> String {
    if zone.is_utc() {
        return UTC_LABEL.to_owned();
    }

    format_offset(offset_minutes(zone, instant))
}

/// Minutes ahead of UTC (negative when behind).
///
/// For named zones the instant is rendered as a naive wall-clock time, to the
/// second, both in UTC and in the zone, and the two are differenced.
pub fn offset_minutes(zone: ZoneId, instant: DateTime<Utc>) -> i32 {
    match zone {
        ZoneId::Local => instant.with_timezone(&Local).offset().local_minus_utc() / 60,
        ZoneId::Named(tz) => {
            let utc_wall = instant.naive_utc().trunc_subsecs(0);
            let zone_wall = instant.with_timezone(&tz).naive_local().trunc_subsecs(0);
            let seconds = (zone_wall - utc_wall).num_seconds();

            (seconds as f64 / 60.0).round() as i32
        }
    }
}

pub fn format_offset(minutes: i32) -> String {
    let sign = if minutes >= 0 { '+' } else { '-' };
    let magnitude = minutes.unsigned_abs();

    format!("UTC{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
}
