use std::borrow::Cow;

use iced::Element;
use masterror::AppError;
use thiserror::Error;

use crate::{
    event_bus::EventBusError, module_context::ModuleContext, modules::clock::FormatError,
    zone::ZoneError,
};

pub mod clock;

/// Errors that can occur while building or registering a module.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Propagates failures originating from the event bus.
    #[error("module event bus interaction failed: {0}")]
    EventBus(#[from] EventBusError),
    /// A configured zone could not be resolved or selected.
    #[error(transparent)]
    Zone(#[from] ZoneError),
    #[error(transparent)]
    Format(#[from] FormatError),
    /// Domain-specific registration failures surfaced by the module.
    #[error("module registration failed: {reason}")]
    Registration { reason: Cow<'static, str> },
}

impl ModuleError {
    /// Construct a registration error with the provided reason.
    pub fn registration(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Registration {
            reason: reason.into(),
        }
    }
}

impl From<ModuleError> for AppError {
    fn from(err: ModuleError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Behaviour shared by the modules rendered in the window.
///
/// Modules receive per-frame inputs as [`ViewData`](Module::ViewData) when
/// rendering. The [`register`](Module::register) hook exposes the shared
/// [`ModuleContext`], allowing modules to cache typed event senders and start
/// background work.
pub trait Module {
    type ViewData<'a>;
    type RegistrationData<'a>;
    type Message;

    /// Register the module with the shared runtime context.
    ///
    /// The default implementation performs no work. Implementations can use the
    /// [`ModuleContext`] to acquire a
    /// [`ModuleEventSender`](crate::ModuleEventSender) tied to their event enum:
    ///
    /// ```no_run
    /// use iced::{Element, widget::text};
    /// use tzclock_core::event_bus::ModuleEvent;
    /// use tzclock_core::modules::{Module, ModuleError, clock};
    /// use tzclock_core::ModuleContext;
    ///
    /// #[derive(Default)]
    /// struct ExampleModule {
    ///     sender: Option<tzclock_core::ModuleEventSender<clock::Message>>,
    /// }
    ///
    /// impl Module for ExampleModule {
    ///     type ViewData<'a> = ();
    ///     type RegistrationData<'a> = ();
    ///     type Message = clock::Message;
    ///
    ///     fn register(
    ///         &mut self,
    ///         ctx: &ModuleContext,
    ///         _data: Self::RegistrationData<'_>,
    ///     ) -> Result<(), ModuleError> {
    ///         self.sender = Some(ctx.module_sender(ModuleEvent::Clock));
    ///         Ok(())
    ///     }
    ///
    ///     fn view(&self, _data: Self::ViewData<'_>) -> Element<'_, clock::Message> {
    ///         text("example").into()
    ///     }
    /// }
    /// ```
    fn register(
        &mut self,
        ctx: &ModuleContext,
        data: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError> {
        let _ = (ctx, data);
        Ok(())
    }

    fn view(&self, data: Self::ViewData<'_>) -> Element<'_, Self::Message>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_keeps_reason() {
        let err = ModuleError::registration("no clocks configured");
        assert_eq!(
            err.to_string(),
            "module registration failed: no clocks configured"
        );
    }

    #[test]
    fn zone_errors_convert_transparently() {
        let err: ModuleError = ZoneError::Unknown {
            id: "Mars/Base".to_owned(),
        }
        .into();

        assert_eq!(err.to_string(), "unknown timezone identifier 'Mars/Base'");
    }

    #[test]
    fn bus_errors_keep_their_context() {
        let err: ModuleError = EventBusError::QueueFull { capacity: 1 }.into();

        assert_eq!(
            err.to_string(),
            "module event bus interaction failed: Event queue is full (capacity: 1)"
        );
    }
}
