use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Metadata, Result};

/// Notification of a completed, persisted state change. Named distinctly
/// from the domain event that produced it (e.g. `UserConfirmed`).
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationEvent {
    pub name: String,
    pub payload: Map<String, Value>,
    pub metadata: Metadata,
}

impl IntegrationEvent {
    pub fn new(name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            payload: Map::new(),
            metadata,
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Serialize) -> Result<Self> {
        self.payload.insert(field.into(), serde_json::to_value(value)?);
        Ok(self)
    }
}

/// Publishes integration events to zero or more subscribers. Delivery
/// semantics (sync/async, at-least/most-once) belong to the implementation.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn dispatch(&self, event: IntegrationEvent) -> Result<()>;
}

#[async_trait]
impl<T: MessageBus + ?Sized> MessageBus for Arc<T> {
    async fn dispatch(&self, event: IntegrationEvent) -> Result<()> {
        (**self).dispatch(event).await
    }
}

/// In-process bus that records every dispatched event, in order.
#[derive(Default)]
pub struct MemoryBus {
    events: Mutex<Vec<IntegrationEvent>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|e| e.name.to_owned())
            .collect()
    }

    pub fn take(&self) -> Vec<IntegrationEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

#[async_trait]
impl MessageBus for MemoryBus {
    async fn dispatch(&self, event: IntegrationEvent) -> Result<()> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
        Ok(())
    }
}
