//! Handler registration system.
//!
//! The registry maintains a mapping from event names to their handlers.

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::EventHandler;

/// Registry of all event handlers, built at startup.
pub struct TransformRegistry {
    /// Handlers indexed by event name for fast lookup
    handlers: HashMap<&'static str, Vec<Arc<dyn EventHandler>>>,
    /// All handlers (de-duplicated across triggers)
    all_handlers: Vec<Arc<dyn EventHandler>>,
}

impl TransformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            all_handlers: Vec::new(),
        }
    }

    /// Register a handler under each of its triggers.
    pub fn register<H: EventHandler>(&mut self, handler: H) {
        let handler = Arc::new(handler);

        for trigger in handler.triggers() {
            self.handlers
                .entry(trigger)
                .or_default()
                .push(handler.clone());
        }

        self.all_handlers.push(handler);
    }

    /// Get handlers for a specific event name. Unknown names yield no
    /// handlers, so the envelope silently contributes no rows.
    pub fn handlers_for(&self, event_name: &str) -> &[Arc<dyn EventHandler>] {
        self.handlers
            .get(event_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get count of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.all_handlers.len()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the registry with all handlers.
///
/// This is where handlers are registered at compile-time. Add new handler
/// registrations in the event module as they are implemented.
pub fn build_registry() -> TransformRegistry {
    let mut registry = TransformRegistry::new();

    super::event::register_handlers(&mut registry);

    tracing::info!(
        "Built transform registry with {} handler(s)",
        registry.handler_count()
    );

    registry
}
