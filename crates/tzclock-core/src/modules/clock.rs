use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use iced::Element;
use log::{debug, error, info, trace};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tzclock_proto::config::{ClockBinding, Config};

use crate::{
    ModuleContext, ModuleEventSender,
    event_bus::ModuleEvent,
    modules::{Module, ModuleError},
    style::FacePalette,
    zone::{ZoneError, ZoneId, ZoneLabels},
};

mod face;
mod offset;
mod reading;
mod selection;
mod view;

pub use face::{AnimatedHand, ClockFace, CubicBezier, HandTransition, Marker, hour_markers, minute_markers};
pub use offset::{format_offset, offset_label, offset_minutes};
pub use reading::{ClockReading, FormatError, HandAngles, ReadingFormats};
pub use selection::{ZoneBanner, ZoneContext, subtitle_for};
pub use view::{ClockView, FacePainter, clock_card};

/// Lifecycle of the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Init,
    Running,
}

/// Events emitted by the ticker task.
#[derive(Debug, Clone)]
pub enum ClockEvent {
    Tick(DateTime<Utc>),
}

/// Message type for GUI communication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Wall-clock instant captured by the ticker when it fired.
    Tick(DateTime<Utc>),
    SelectZone(ZoneId),
}

/// Which zone a clock reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneBinding {
    /// Follows the zone picked in the selector.
    Selected,
    Fixed(ZoneId),
}

impl ZoneBinding {
    pub fn resolve(self, selected: ZoneId) -> ZoneId {
        match self {
            Self::Selected => selected,
            Self::Fixed(zone) => zone,
        }
    }

    fn from_config(binding: &ClockBinding) -> Result<Self, ZoneError> {
        match binding {
            ClockBinding::Selected => Ok(Self::Selected),
            ClockBinding::Fixed(id) => ZoneId::parse(id).map(Self::Fixed),
        }
    }
}

/// Values last written to one clock's display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClockSnapshot {
    pub zone:   ZoneId,
    pub angles: HandAngles,
    pub time:   String,
    pub date:   Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClockInstance {
    name:      String,
    binding:   ZoneBinding,
    show_date: bool,
    face:      ClockFace,
    snapshot:  ClockSnapshot,
}

impl ClockInstance {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binding(&self) -> ZoneBinding {
        self.binding
    }

    pub fn follows_selection(&self) -> bool {
        self.binding == ZoneBinding::Selected
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    pub fn snapshot(&self) -> &ClockSnapshot {
        &self.snapshot
    }

    fn recompute(&mut self, selected: ZoneId, formats: &ReadingFormats, instant: DateTime<Utc>, frame: Instant) {
        let zone = self.binding.resolve(selected);
        let reading = ClockReading::at(zone, instant, formats);
        let angles = HandAngles::from_reading(&reading);

        self.face.set_targets(angles, frame);
        self.snapshot = ClockSnapshot {
            zone,
            angles,
            time: reading.time_string,
            date: self.show_date.then_some(reading.date_string),
        };
    }
}

/// Owns the periodic trigger task; dropping the handle aborts the task.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    fn spawn(runtime: &Handle, period: Duration, sender: ModuleEventSender<ClockEvent>) -> Self {
        let task = runtime.spawn(async move {
            // the first snapshot is computed synchronously during registration
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                if let Err(err) = sender.try_send(ClockEvent::Tick(Utc::now())) {
                    error!("Failed to publish clock tick: {err}");
                }
            }
        });

        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Analog clocks for the selected zone and any fixed zones.
///
/// Starts in [`Phase::Init`]. [`Clock::register`] builds every face, computes
/// the first snapshot, and starts the ticker; each [`Message::Tick`] then
/// recomputes all clocks from the instant it carries.
#[derive(Debug)]
pub struct Clock {
    phase:         Phase,
    clocks:        Vec<ClockInstance>,
    context:       ZoneContext,
    formats:       ReadingFormats,
    tick_interval: Duration,
    sender:        Option<ModuleEventSender<ClockEvent>>,
    ticker:        Option<TickerHandle>,
}

impl Clock {
    /// # Errors
    ///
    /// Fails when a configured zone id is unknown, the initial zone is not
    /// offered by the selector, or the readout formats are invalid.
    pub fn from_config(config: &Config) -> Result<Self, ModuleError> {
        let selectable = config
            .zones
            .iter()
            .map(|id| ZoneId::parse(id))
            .collect::<Result<Vec<_>, _>>()?;
        let initial = ZoneId::parse(&config.initial_zone)?;
        let labels = ZoneLabels::new(config.labels.clone());
        let context = ZoneContext::new(selectable, initial, labels, Utc::now())?;

        let clocks = config
            .clocks
            .iter()
            .map(|def| {
                let binding = ZoneBinding::from_config(&def.zone)?;
                Ok(ClockInstance {
                    name: def.name.clone(),
                    binding,
                    show_date: def.show_date,
                    face: ClockFace::default(),
                    snapshot: ClockSnapshot {
                        zone: binding.resolve(initial),
                        ..ClockSnapshot::default()
                    },
                })
            })
            .collect::<Result<Vec<_>, ZoneError>>()?;

        if clocks.is_empty() {
            return Err(ModuleError::registration("no clocks configured"));
        }

        Ok(Self {
            phase: Phase::Init,
            clocks,
            context,
            formats: ReadingFormats::from_config(&config.format)?,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            sender: None,
            ticker: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clocks(&self) -> &[ClockInstance] {
        &self.clocks
    }

    pub fn context(&self) -> &ZoneContext {
        &self.context
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    /// Stops the ticker and returns to [`Phase::Init`]; displayed values are
    /// kept.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
            info!("clock ticker stopped");
        }
        self.phase = Phase::Init;
    }

    /// # Errors
    ///
    /// Returns [`ModuleError::Zone`] when the selection is rejected.
    pub fn update(&mut self, message: Message) -> Result<(), ModuleError> {
        self.update_at(message, Instant::now())
    }

    /// Applies `message` with hand transitions starting at `frame`.
    pub fn update_at(&mut self, message: Message, frame: Instant) -> Result<(), ModuleError> {
        match message {
            Message::Tick(instant) => {
                if self.phase == Phase::Running {
                    self.tick(instant, frame);
                } else {
                    trace!("ignoring clock tick before registration");
                }
                Ok(())
            }
            Message::SelectZone(zone) => self.select_zone(zone, Utc::now()),
        }
    }

    /// Changes the zone followed by the primary clocks. Title, subtitle and
    /// offset update immediately; hands follow on the next tick.
    pub fn select_zone(&mut self, zone: ZoneId, instant: DateTime<Utc>) -> Result<(), ModuleError> {
        self.context.select(zone, instant)?;
        Ok(())
    }

    fn tick(&mut self, instant: DateTime<Utc>, frame: Instant) {
        let selected = self.context.selected();

        for clock in &mut self.clocks {
            clock.recompute(selected, &self.formats, instant, frame);
        }
        self.context.refresh_banner(instant);
    }

    fn start(&mut self, runtime: &Handle, instant: DateTime<Utc>, frame: Instant) {
        let selected = self.context.selected();

        for clock in &mut self.clocks {
            let zone = clock.binding.resolve(selected);
            let angles = HandAngles::from_reading(&ClockReading::at(zone, instant, &self.formats));
            clock.face.build(angles, frame);
        }

        self.context.refresh_banner(instant);
        self.tick(instant, frame);

        if let Some(sender) = self.sender.clone() {
            self.ticker = Some(TickerHandle::spawn(runtime, self.tick_interval, sender));
        }

        self.phase = Phase::Running;
        debug!(
            "clock running with {} faces every {:?}",
            self.clocks.len(),
            self.tick_interval
        );
    }
}

/// Per-frame inputs for rendering the clocks.
#[derive(Debug, Clone, Copy)]
pub struct ClockViewData<'a> {
    pub palette: &'a FacePalette,
    pub frame:   Instant,
    pub size:    f32,
}

impl Module for Clock {
    type ViewData<'a> = ClockViewData<'a>;
    type RegistrationData<'a> = ();
    type Message = Message;

    fn register(&mut self, ctx: &ModuleContext, _data: Self::RegistrationData<'_>) -> Result<(), ModuleError> {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }

        self.sender = Some(ctx.module_sender(|ClockEvent::Tick(at)| {
            trace!("clock tick at {at}");
            ModuleEvent::Clock(Message::Tick(at))
        }));
        self.start(ctx.runtime_handle(), Utc::now(), Instant::now());
        ctx.request_redraw()?;

        Ok(())
    }

    fn view(&self, data: Self::ViewData<'_>) -> Element<'_, Message> {
        view::clock_row(self, data)
    }
}
