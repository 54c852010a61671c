use std::fmt;

use iced::{
    Alignment, Element, Length,
    widget::{pick_list, row, text},
};
use tzclock_core::{modules::clock::ZoneContext, zone::ZoneId};

use crate::app::Message;

/// One entry of the zone selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneChoice {
    pub zone:  ZoneId,
    pub label: String,
}

impl fmt::Display for ZoneChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Selector entries in configured order, labelled from the zone label table.
pub(crate) fn zone_choices(context: &ZoneContext) -> Vec<ZoneChoice> {
    context
        .selectable()
        .iter()
        .map(|&zone| ZoneChoice {
            zone,
            label: context.labels().label_or_id(zone).to_owned(),
        })
        .collect()
}

pub(crate) fn zone_selector(choices: &[ZoneChoice], selected: ZoneId) -> Element<'_, Message> {
    let current = choices.iter().find(|choice| choice.zone == selected).cloned();

    row![
        text("Timezone").size(16),
        pick_list(choices, current, Message::SelectZone).width(Length::Fixed(220.0)),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}
