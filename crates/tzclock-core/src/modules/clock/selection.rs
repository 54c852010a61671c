use chrono::{DateTime, Utc};
use log::debug;

use super::offset::offset_label;
use crate::zone::{ZoneError, ZoneId, ZoneLabels};

const LOCAL_TITLE: &str = "ローカル時間";
const LOCAL_SUBTITLE: &str = "Local Time";

/// Title, subtitle and offset shown above the clock that follows the selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneBanner {
    pub title:    String,
    pub subtitle: String,
    pub offset:   String,
}

impl ZoneBanner {
    /// The local zone is always titled `ローカル時間`; `[labels]` entries only
    /// rename tz database zones.
    pub fn for_zone(zone: ZoneId, labels: &ZoneLabels, instant: DateTime<Utc>) -> Self {
        let title = if zone.is_local() {
            LOCAL_TITLE
        } else {
            labels.label_or_id(zone)
        };

        Self {
            title:    title.to_owned(),
            subtitle: subtitle_for(zone),
            offset:   offset_label(zone, instant),
        }
    }
}

/// `America/New_York` becomes `New York`; only the first underscore is
/// replaced.
pub fn subtitle_for(zone: ZoneId) -> String {
    if zone.is_local() {
        return LOCAL_SUBTITLE.to_owned();
    }

    let id = zone.id();
    let city = id.rsplit('/').next().unwrap_or(id);

    city.replacen('_', " ", 1)
}

/// Selection state shared between the selector and the render loop.
///
/// Owned by the clock module and passed to whatever needs the current zone;
/// there is no process-wide selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneContext {
    selected:   ZoneId,
    selectable: Vec<ZoneId>,
    labels:     ZoneLabels,
    banner:     ZoneBanner,
}

impl ZoneContext {
    /// # Errors
    ///
    /// Returns [`ZoneError::NotSelectable`] when `initial` is not one of
    /// `selectable`.
    pub fn new(
        selectable: Vec<ZoneId>,
        initial: ZoneId,
        labels: ZoneLabels,
        instant: DateTime<Utc>,
    ) -> Result<Self, ZoneError> {
        if !selectable.contains(&initial) {
            return Err(ZoneError::NotSelectable {
                id: initial.id().to_owned(),
            });
        }

        let banner = ZoneBanner::for_zone(initial, &labels, instant);

        Ok(Self {
            selected: initial,
            selectable,
            labels,
            banner,
        })
    }

    pub fn selected(&self) -> ZoneId {
        self.selected
    }

    pub fn selectable(&self) -> &[ZoneId] {
        &self.selectable
    }

    pub fn labels(&self) -> &ZoneLabels {
        &self.labels
    }

    pub fn banner(&self) -> &ZoneBanner {
        &self.banner
    }

    /// Switches the followed zone and refreshes the banner right away, without
    /// waiting for the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::NotSelectable`] and keeps the current selection
    /// when `zone` is not offered.
    pub fn select(&mut self, zone: ZoneId, instant: DateTime<Utc>) -> Result<&ZoneBanner, ZoneError> {
        if !self.selectable.contains(&zone) {
            return Err(ZoneError::NotSelectable {
                id: zone.id().to_owned(),
            });
        }

        debug!("zone selection changed from {} to {zone}", self.selected);
        self.selected = zone;
        self.refresh_banner(instant);

        Ok(&self.banner)
    }

    pub fn refresh_banner(&mut self, instant: DateTime<Utc>) {
        self.banner = ZoneBanner::for_zone(self.selected, &self.labels, instant);
    }
}
