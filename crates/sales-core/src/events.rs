//! # Sale Events
//!
//! One notification per successful mutation.
//!
//! ```text
//! create      ──► SaleCreated   { sale_id }
//! replace     ──► SaleModified  { sale_id }
//! cancel      ──► SaleCancelled { sale_id }
//! cancel item ──► ItemCancelled { sale_id, product_name }
//! ```
//!
//! Notifications are observational: they are emitted after the store call
//! succeeds, and an emitter cannot fail the mutation (the trait methods
//! return nothing). They are not persisted.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// A domain notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum SaleEvent {
    SaleCreated { sale_id: Uuid },
    SaleModified { sale_id: Uuid },
    SaleCancelled { sale_id: Uuid },
    ItemCancelled { sale_id: Uuid, product_name: String },
}

impl SaleEvent {
    /// Event name as written to logs.
    pub fn name(&self) -> &'static str {
        match self {
            SaleEvent::SaleCreated { .. } => "SaleCreated",
            SaleEvent::SaleModified { .. } => "SaleModified",
            SaleEvent::SaleCancelled { .. } => "SaleCancelled",
            SaleEvent::ItemCancelled { .. } => "ItemCancelled",
        }
    }

    /// The sale the event is about.
    pub fn sale_id(&self) -> Uuid {
        match self {
            SaleEvent::SaleCreated { sale_id }
            | SaleEvent::SaleModified { sale_id }
            | SaleEvent::SaleCancelled { sale_id }
            | SaleEvent::ItemCancelled { sale_id, .. } => *sale_id,
        }
    }
}

// =============================================================================
// Event Emitter Trait
// =============================================================================

/// Receives sale notifications. Implementations must not block.
pub trait SaleEventEmitter: Send + Sync {
    fn emit(&self, event: &SaleEvent);
}

/// Writes each event as one structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEmitter;

impl SaleEventEmitter for TracingEmitter {
    fn emit(&self, event: &SaleEvent) {
        match event {
            SaleEvent::ItemCancelled {
                sale_id,
                product_name,
            } => {
                info!(event = event.name(), %sale_id, product = %product_name, "[EVENT] {}", event.name());
            }
            _ => {
                info!(event = event.name(), sale_id = %event.sale_id(), "[EVENT] {}", event.name());
            }
        }
    }
}

/// No-op event emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEmitter;

impl SaleEventEmitter for NoOpEmitter {
    fn emit(&self, _event: &SaleEvent) {}
}

/// Keeps every event in memory, for tests and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmitter {
    events: Arc<Mutex<Vec<SaleEvent>>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, oldest first.
    pub fn events(&self) -> Vec<SaleEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SaleEventEmitter for RecordingEmitter {
    fn emit(&self, event: &SaleEvent) {
        // A poisoned lock only means another test thread panicked mid-push.
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
