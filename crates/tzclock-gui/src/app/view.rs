use std::time::Instant;

use iced::{
    Alignment, Element, Length, Theme,
    widget::{column, container, scrollable},
};
use tzclock_core::{
    modules::{Module, clock::ClockViewData},
    style::tzclock_theme,
};

use super::state::{App, Message};
use crate::views::clock::zone_selector;

impl App {
    pub fn title(&self) -> String {
        format!("tzclock - {}", self.clock.context().banner().title)
    }

    pub fn theme(&self) -> Theme {
        tzclock_theme(&self.config.appearance)
    }

    pub fn scale_factor(&self) -> f64 {
        self.config.appearance.scale_factor
    }

    pub fn view(&self) -> Element<'_, Message> {
        let clocks = self
            .clock
            .view(ClockViewData {
                palette: &self.palette,
                frame:   Instant::now(),
                size:    self.config.appearance.face_size,
            })
            .map(Message::Clock);

        let content = column![
            zone_selector(&self.choices, self.clock.context().selected()),
            scrollable(clocks).direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::default()
            )),
        ]
        .spacing(24)
        .align_x(Alignment::Center);

        container(content)
            .padding(24)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}
