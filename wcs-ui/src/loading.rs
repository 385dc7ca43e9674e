//! Background catalog load
//!
//! The load is the only asynchronous step: one task fetches and parses the
//! sheet, then records the outcome on the session and announces it.

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use wcs_common::events::CatalogEvent;
use wcs_common::loader::load_catalog;

use crate::AppState;

/// Start the load on the runtime and return its handle
pub fn spawn_catalog_load(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move { run_catalog_load(&state).await })
}

/// Fetch, parse and hand the result to the session
pub async fn run_catalog_load(state: &AppState) {
    let outcome = load_catalog(&state.source, &state.columns).await;

    let event = match &outcome {
        Ok(wines) => {
            info!("✓ Catalog loaded from {} ({} wines)", state.source, wines.len());
            CatalogEvent::CatalogLoaded {
                record_count: wines.len(),
                timestamp: Utc::now(),
            }
        }
        Err(e) => {
            error!("Failed to load catalog from {}: {}", state.source, e);
            CatalogEvent::CatalogLoadFailed {
                kind: e.kind().to_string(),
                message: e.to_string(),
                timestamp: Utc::now(),
            }
        }
    };

    {
        let mut session = state.session.write().await;
        if let Err(e) = session.complete_load(outcome) {
            warn!("Discarding load result: {}", e);
            return;
        }
    }

    state.events.emit_lossy(event);
}
