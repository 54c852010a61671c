use std::sync::Arc;

use iced::{Subscription, Task, time};
use log::{error, warn};
use tzclock_core::{
    event_bus::{BusEvent, ModuleEvent},
    modules::{self, Module},
};

use super::{
    bus::drain_bus,
    state::{App, Message},
};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MicroTick => {
                Task::perform(drain_bus(Arc::clone(&self.bus_receiver)), Message::BusFlushed)
            }
            Message::BusFlushed(outcome) => {
                if outcome.had_error() {
                    error!("failed to drain event bus, keeping fast cadence");
                    self.micro_ticker.record_activity();
                }

                if outcome.is_empty() {
                    if !outcome.had_error() {
                        self.micro_ticker.record_idle();
                    }
                    Task::none()
                } else {
                    if !outcome.had_error() {
                        self.micro_ticker.record_activity();
                    }

                    let tasks: Vec<_> = outcome
                        .into_events()
                        .into_iter()
                        .filter_map(App::message_from_bus_event)
                        .map(|msg| self.update(msg))
                        .collect();

                    Task::batch(tasks)
                }
            }
            Message::None => Task::none(),
            Message::Clock(message) => {
                if let Err(err) = self.clock.update(message) {
                    warn!("clock update rejected: {err}");
                }
                Task::none()
            }
            Message::SelectZone(choice) => {
                self.update(Message::Clock(modules::clock::Message::SelectZone(choice.zone)))
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        time::every(self.micro_ticker.interval()).map(|_| Message::MicroTick)
    }

    pub(crate) fn register_modules(&mut self) {
        if let Err(err) = self.clock.register(&self.module_context, ()) {
            error!("failed to register clock module: {err}");
        }
    }

    pub(super) fn message_from_bus_event(event: BusEvent) -> Option<Message> {
        match event {
            BusEvent::Redraw => Some(Message::None),
            BusEvent::Module(module) => App::message_from_module_event(module),
            _ => None,
        }
    }

    fn message_from_module_event(event: ModuleEvent) -> Option<Message> {
        match event {
            ModuleEvent::Clock(message) => Some(Message::Clock(message)),
            _ => None,
        }
    }
}
