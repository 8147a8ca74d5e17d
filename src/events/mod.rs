// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and not exported

pub mod bus;
pub mod types;

pub use types::{DomainEvent, UrlRewritesDeleted, UrlRewritesRegenerated};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
