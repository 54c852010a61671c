use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::modules;
use masterror::AppError;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum BusEvent {
    Redraw,
    Module(ModuleEvent),
}

impl BusEvent {
    fn is_coalescable_with(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (BusEvent::Redraw, BusEvent::Redraw)
                | (
                    BusEvent::Module(ModuleEvent::Clock(modules::clock::Message::Tick(_))),
                    BusEvent::Module(ModuleEvent::Clock(modules::clock::Message::Tick(_)))
                )
        )
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ModuleEvent {
    Clock(modules::clock::Message),
}

#[derive(Debug)]
struct EventBusInner {
    queue: Mutex<VecDeque<BusEvent>>,
    capacity: usize,
}

impl EventBusInner {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity.get())),
            capacity: capacity.get(),
        }
    }

    fn push(&self, event: BusEvent) -> Result<(), EventBusError> {
        let mut queue = self.queue.lock().map_err(|_| EventBusError::Poisoned)?;

        if let Some(last) = queue.back()
            && event.is_coalescable_with(last)
        {
            return Ok(());
        }

        if queue.len() >= self.capacity {
            return Err(EventBusError::QueueFull {
                capacity: self.capacity,
            });
        }

        queue.push_back(event);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBusError {
    QueueFull { capacity: usize },
    Poisoned,
}

impl std::fmt::Display for EventBusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "Event queue is full (capacity: {})", capacity)
            }
            Self::Poisoned => write!(f, "Event queue state is poisoned"),
        }
    }
}

impl std::error::Error for EventBusError {}

impl From<EventBusError> for AppError {
    fn from(err: EventBusError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Bounded queue carrying events from background tasks to the UI thread.
///
/// Consecutive duplicates of redraw and clock tick events collapse into one,
/// so a slow UI never sees a backlog of stale ticks.
#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl EventBus {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(EventBusInner::new(capacity)),
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn publish(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }

    pub fn drain(&self) -> Result<Vec<BusEvent>, EventBusError> {
        let mut queue = self
            .inner
            .queue
            .lock()
            .map_err(|_| EventBusError::Poisoned)?;

        Ok(queue.drain(..).collect())
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Arc<EventBusInner>,
}

impl EventSender {
    pub fn try_send(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }
}

#[derive(Debug)]
pub struct EventReceiver {
    inner: Arc<EventBusInner>,
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Result<Option<BusEvent>, EventBusError> {
        let mut queue = self
            .inner
            .queue
            .lock()
            .map_err(|_| EventBusError::Poisoned)?;

        Ok(queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{modules::clock::Message, zone::ZoneId};

    fn bus(capacity: usize) -> EventBus {
        EventBus::new(NonZeroUsize::new(capacity).expect("non-zero"))
    }

    fn tick() -> BusEvent {
        BusEvent::Module(ModuleEvent::Clock(Message::Tick(Utc::now())))
    }

    #[test]
    fn consecutive_ticks_are_coalesced() {
        let bus = bus(4);
        let sender = bus.sender();

        for _ in 0..3 {
            sender.try_send(tick()).expect("queued");
        }

        assert_eq!(bus.drain().expect("drain").len(), 1);
    }

    #[test]
    fn selections_are_never_coalesced() {
        let bus = bus(4);

        bus.publish(BusEvent::Module(ModuleEvent::Clock(Message::SelectZone(ZoneId::UTC))))
            .expect("queued");
        bus.publish(BusEvent::Module(ModuleEvent::Clock(Message::SelectZone(ZoneId::Local))))
            .expect("queued");

        assert_eq!(bus.drain().expect("drain").len(), 2);
    }

    #[test]
    fn full_queue_rejects_new_events() {
        let bus = bus(1);

        bus.publish(tick()).expect("queued");
        let err = bus
            .publish(BusEvent::Redraw)
            .expect_err("queue should be full");

        assert_eq!(err, EventBusError::QueueFull { capacity: 1 });
    }

    #[test]
    fn receiver_pops_in_order() {
        let bus = bus(4);
        let mut receiver = bus.receiver();

        bus.publish(BusEvent::Redraw).expect("queued");
        bus.publish(tick()).expect("queued");

        assert!(matches!(receiver.try_recv(), Ok(Some(BusEvent::Redraw))));
        assert!(matches!(
            receiver.try_recv(),
            Ok(Some(BusEvent::Module(ModuleEvent::Clock(Message::Tick(_)))))
        ));
        assert!(matches!(receiver.try_recv(), Ok(None)));
    }
}
