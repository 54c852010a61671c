use std::sync::{Arc, Mutex};

use flexi_logger::LoggerHandle;
use iced::Task;
use log::info;
use tokio::runtime::Handle;
use tzclock_core::{
    ModuleContext,
    config::Config,
    event_bus::{EventReceiver, EventSender},
    modules::{self, clock::Clock},
    style::FacePalette,
};

use super::{bus::BusFlushOutcome, micro_ticker::MicroTicker};
use crate::{
    get_log_spec,
    views::clock::{ZoneChoice, zone_choices},
};

pub struct App {
    pub(super) logger:         LoggerHandle,
    pub(super) bus_receiver:   Arc<Mutex<EventReceiver>>,
    pub(super) micro_ticker:   MicroTicker,
    pub(super) module_context: ModuleContext,
    pub(super) palette:        FacePalette,
    pub(super) choices:        Vec<ZoneChoice>,
    pub config:                Config,
    pub clock:                 Clock,
}

#[derive(Debug, Clone)]
pub enum Message {
    None,
    MicroTick,
    BusFlushed(BusFlushOutcome),
    Clock(modules::clock::Message),
    SelectZone(ZoneChoice),
}

impl App {
    pub fn new(
        (logger, config, clock, event_sender, runtime_handle, bus_receiver): (
            LoggerHandle,
            Config,
            Clock,
            EventSender,
            Handle,
            EventReceiver,
        ),
    ) -> impl FnOnce() -> (Self, Task<Message>) {
        move || {
            let module_context = ModuleContext::new(event_sender, runtime_handle);
            let mut app = App {
                logger,
                bus_receiver: Arc::new(Mutex::new(bus_receiver)),
                micro_ticker: MicroTicker::for_tick_interval(clock.tick_interval()),
                module_context,
                palette: FacePalette::from_appearance(&config.appearance),
                choices: zone_choices(clock.context()),
                config,
                clock,
            };

            app.logger.set_new_spec(get_log_spec(&app.config.log_level));
            app.register_modules();
            info!(
                "tzclock started with {} clocks, following {}",
                app.clock.clocks().len(),
                app.clock.context().selected()
            );

            (app, Task::none())
        }
    }
}
