use iced::{
    Alignment, Element, Length, Point, Radians, Rectangle, Renderer, Theme, Vector, mouse,
    widget::{
        Canvas, Column, Row,
        canvas::{self, Frame, Geometry, LineCap, Path, Stroke},
        column, container, text,
    },
};

use super::{Clock, ClockInstance, ClockViewData, HandAngles, Marker, Message, ZoneBanner, ZoneContext};
use crate::style::{FacePalette, banner_text_style, card_container_style};

const RIM_INSET: f32 = 4.0;

/// Canvas program painting one dial: face, markers, three hands and the hub.
#[derive(Debug, Clone, Copy)]
pub struct FacePainter<'a> {
    pub angles:         HandAngles,
    pub minute_markers: &'a [Marker],
    pub hour_markers:   &'a [Marker],
    pub palette:        FacePalette,
}

struct HandStyle {
    length: f32,
    width:  f32,
}

const HOUR_HAND: HandStyle = HandStyle {
    length: 0.5,
    width:  6.0,
};
const MINUTE_HAND: HandStyle = HandStyle {
    length: 0.75,
    width:  4.0,
};
const SECOND_HAND: HandStyle = HandStyle {
    length: 0.85,
    width:  2.0,
};

impl FacePainter<'_> {
    fn draw_markers(&self, frame: &mut Frame, radius: f32) {
        let minute = Stroke::default()
            .with_width(1.0)
            .with_color(self.palette.marker);
        let hour = Stroke::default()
            .with_width(3.0)
            .with_color(self.palette.hour_marker)
            .with_line_cap(LineCap::Round);

        for (markers, inner, stroke) in [
            (self.minute_markers, 0.93, minute),
            (self.hour_markers, 0.85, hour),
        ] {
            for marker in markers {
                frame.with_save(|frame| {
                    frame.rotate(Radians(marker.rotation.to_radians()));
                    frame.stroke(
                        &Path::line(Point::new(0.0, -radius * inner), Point::new(0.0, -radius)),
                        stroke,
                    );
                });
            }
        }
    }

    fn draw_hand(&self, frame: &mut Frame, radius: f32, angle: f64, style: &HandStyle, color: iced::Color) {
        frame.with_save(|frame| {
            frame.rotate(Radians((angle as f32).to_radians()));
            frame.stroke(
                &Path::line(
                    Point::new(0.0, radius * 0.1),
                    Point::new(0.0, -radius * style.length),
                ),
                Stroke::default()
                    .with_width(style.width)
                    .with_color(color)
                    .with_line_cap(LineCap::Round),
            );
        });
    }
}

impl<M> canvas::Program<M> for FacePainter<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = (frame.width().min(frame.height()) / 2.0 - RIM_INSET).max(1.0);

        frame.fill(&Path::circle(center, radius), self.palette.face);
        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(2.0).with_color(self.palette.rim),
        );

        frame.translate(Vector::new(center.x, center.y));
        self.draw_markers(&mut frame, radius);
        self.draw_hand(&mut frame, radius, self.angles.hour, &HOUR_HAND, self.palette.hand);
        self.draw_hand(&mut frame, radius, self.angles.minute, &MINUTE_HAND, self.palette.hand);
        self.draw_hand(
            &mut frame,
            radius,
            self.angles.second,
            &SECOND_HAND,
            self.palette.second_hand,
        );
        frame.fill(&Path::circle(Point::ORIGIN, 5.0), self.palette.second_hand);

        vec![frame.into_geometry()]
    }
}

/// Everything one clock card displays, borrowed from the module state.
#[derive(Debug, Clone, Copy)]
pub struct ClockView<'a> {
    pub name:    &'a str,
    pub time:    &'a str,
    pub date:    Option<&'a str>,
    pub banner:  Option<&'a ZoneBanner>,
    pub painter: FacePainter<'a>,
}

impl<'a> ClockView<'a> {
    pub fn new(instance: &'a ClockInstance, context: &'a ZoneContext, data: ClockViewData<'_>) -> Self {
        let face = instance.face();

        Self {
            name:    instance.name(),
            time:    &instance.snapshot().time,
            date:    instance.snapshot().date.as_deref(),
            banner:  instance.follows_selection().then(|| context.banner()),
            painter: FacePainter {
                angles:         face.displayed(data.frame),
                minute_markers: face.minute_markers(),
                hour_markers:   face.hour_markers(),
                palette:        *data.palette,
            },
        }
    }
}

pub fn clock_card<'a, M: 'a>(view: ClockView<'a>, size: f32) -> Element<'a, M> {
    let mut content = Column::new().align_x(Alignment::Center).spacing(8);

    if let Some(banner) = view.banner {
        content = content.push(
            column![
                text(banner.title.as_str()).size(22),
                text(banner.subtitle.as_str()).size(14).style(banner_text_style),
                text(banner.offset.as_str()).size(14).style(banner_text_style),
            ]
            .align_x(Alignment::Center)
            .spacing(2),
        );
    }

    content = content
        .push(
            Canvas::new(view.painter)
                .width(Length::Fixed(size))
                .height(Length::Fixed(size)),
        )
        .push(text(view.time).size(28))
        .push_maybe(view.date.map(|date| text(date).size(16)));

    container(content)
        .padding(16)
        .style(card_container_style(view.banner.is_some()))
        .into()
}

pub(super) fn clock_row<'a>(clock: &'a Clock, data: ClockViewData<'_>) -> Element<'a, Message> {
    Row::with_children(
        clock
            .clocks()
            .iter()
            .map(|instance| clock_card(ClockView::new(instance, clock.context(), data), data.size)),
    )
    .spacing(16)
    .align_y(Alignment::Start)
    .into()
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use tzclock_proto::config::Config;

    use super::*;

    #[test]
    fn views_carry_banner_only_for_selected_clocks() {
        let clock = Clock::from_config(&Config::default()).expect("clock");
        let palette = FacePalette::default();
        let data = ClockViewData {
            palette: &palette,
            frame:   Instant::now(),
            size:    200.0,
        };

        let views: Vec<_> = clock
            .clocks()
            .iter()
            .map(|instance| ClockView::new(instance, clock.context(), data))
            .collect();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "clock1");
        assert_eq!(
            views[0].banner.map(|banner| banner.title.as_str()),
            Some("ローカル時間")
        );
        assert!(views[1].banner.is_none());
        assert_eq!(views[0].painter.palette, palette);
    }

    #[test]
    fn unbuilt_face_paints_hands_at_twelve() {
        let clock = Clock::from_config(&Config::default()).expect("clock");
        let palette = FacePalette::default();
        let data = ClockViewData {
            palette: &palette,
            frame:   Instant::now(),
            size:    200.0,
        };

        let view = ClockView::new(&clock.clocks()[0], clock.context(), data);

        assert_eq!(view.painter.angles, HandAngles::default());
        assert!(view.painter.minute_markers.is_empty());
    }
}
