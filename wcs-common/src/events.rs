//! Catalog event types and the broadcast EventBus
//!
//! Every session mutation emits one event so connected views know to
//! re-fetch the catalog. Events are serialized for SSE transmission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::filter::FilterCriteria;

/// Catalog event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CatalogEvent {
    /// Load finished and records are available
    CatalogLoaded {
        record_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Load failed; the session is in its error state
    CatalogLoadFailed {
        kind: String,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// A failed load is being retried from scratch
    CatalogReloadRequested {
        timestamp: DateTime<Utc>,
    },

    /// Search, tab, pairing or style selection changed
    CriteriaChanged {
        criteria: FilterCriteria,
        /// Varietals the expansion policy forced open by this change
        opened: Vec<String>,
        timestamp: DateTime<Utc>,
    },

    /// A group header was toggled by hand
    ExpansionChanged {
        varietal: String,
        expanded: bool,
        timestamp: DateTime<Utc>,
    },

    /// Style dropdown shown or hidden
    StyleDropdownChanged {
        open: bool,
        timestamp: DateTime<Utc>,
    },
}

impl CatalogEvent {
    /// SSE event name
    pub fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::CatalogLoaded { .. } => "CatalogLoaded",
            CatalogEvent::CatalogLoadFailed { .. } => "CatalogLoadFailed",
            CatalogEvent::CatalogReloadRequested { .. } => "CatalogReloadRequested",
            CatalogEvent::CriteriaChanged { .. } => "CriteriaChanged",
            CatalogEvent::ExpansionChanged { .. } => "ExpansionChanged",
            CatalogEvent::StyleDropdownChanged { .. } => "StyleDropdownChanged",
        }
    }
}

/// Broadcast bus for catalog events
///
/// Subscribers only see events emitted after they subscribed. A slow
/// subscriber loses the oldest events once `capacity` is exceeded.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<CatalogEvent>,
    capacity: usize,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: CatalogEvent,
    ) -> Result<usize, broadcast::error::SendError<CatalogEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: CatalogEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
