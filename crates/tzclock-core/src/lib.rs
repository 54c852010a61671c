pub mod config;
pub mod event_bus;
pub mod module_context;
pub mod modules;
pub mod style;
pub mod zone;

pub use module_context::{ModuleContext, ModuleEventSender};
