//! Mutator routes: one per user interaction forwarded by the view
//!
//! Each handler updates the session under the write lock, answers with the
//! refreshed catalog, and announces the change on the event bus.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use wcs_common::events::CatalogEvent;
use wcs_common::ActiveCategory;

use super::catalog::{build_catalog_response, CatalogResponse};
use super::error::ApiError;
use crate::loading::spawn_catalog_load;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct PairingRequest {
    /// Empty string clears the constraint
    #[serde(default)]
    pub pairing: String,
}

#[derive(Debug, Deserialize)]
pub struct StyleRequest {
    pub style: String,
}

#[derive(Debug, Deserialize)]
pub struct ExpansionRequest {
    pub varietal: String,
}

/// Style dropdown action taken from the path
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropdownAction {
    Open,
    Close,
    Toggle,
}

/// POST /api/criteria/search
pub async fn set_search_term(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<CatalogResponse> {
    let (response, event) = {
        let mut session = state.session.write().await;
        let opened = session.set_search_term(request.term);
        let event = CatalogEvent::CriteriaChanged {
            criteria: session.criteria().clone(),
            opened,
            timestamp: Utc::now(),
        };
        (build_catalog_response(&session), event)
    };

    state.events.emit_lossy(event);
    Json(response)
}

/// POST /api/criteria/category
pub async fn set_active_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let category: ActiveCategory = request.category.parse()?;

    let (response, event) = {
        let mut session = state.session.write().await;
        session.set_active_category(category);
        let event = CatalogEvent::CriteriaChanged {
            criteria: session.criteria().clone(),
            opened: Vec::new(),
            timestamp: Utc::now(),
        };
        (build_catalog_response(&session), event)
    };

    state.events.emit_lossy(event);
    Ok(Json(response))
}

/// POST /api/criteria/pairing
pub async fn set_selected_pairing(
    State(state): State<AppState>,
    Json(request): Json<PairingRequest>,
) -> Json<CatalogResponse> {
    let (response, event) = {
        let mut session = state.session.write().await;
        let opened = session.set_selected_pairing(request.pairing);
        let event = CatalogEvent::CriteriaChanged {
            criteria: session.criteria().clone(),
            opened,
            timestamp: Utc::now(),
        };
        (build_catalog_response(&session), event)
    };

    state.events.emit_lossy(event);
    Json(response)
}

/// POST /api/criteria/styles/toggle
pub async fn toggle_selected_style(
    State(state): State<AppState>,
    Json(request): Json<StyleRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    if request.style.trim().is_empty() {
        return Err(ApiError::BadRequest("Empty style".to_string()));
    }

    let (response, event) = {
        let mut session = state.session.write().await;
        let (_, opened) = session.toggle_selected_style(&request.style);
        let event = CatalogEvent::CriteriaChanged {
            criteria: session.criteria().clone(),
            opened,
            timestamp: Utc::now(),
        };
        (build_catalog_response(&session), event)
    };

    state.events.emit_lossy(event);
    Ok(Json(response))
}

/// POST /api/expansion/toggle
pub async fn toggle_group_expansion(
    State(state): State<AppState>,
    Json(request): Json<ExpansionRequest>,
) -> Result<Json<CatalogResponse>, ApiError> {
    if request.varietal.is_empty() {
        return Err(ApiError::BadRequest("Empty varietal".to_string()));
    }

    let (response, event) = {
        let mut session = state.session.write().await;
        let expanded = session.toggle_group_expansion(&request.varietal);
        let event = CatalogEvent::ExpansionChanged {
            varietal: request.varietal,
            expanded,
            timestamp: Utc::now(),
        };
        (build_catalog_response(&session), event)
    };

    state.events.emit_lossy(event);
    Ok(Json(response))
}

/// POST /api/style-dropdown/:action
///
/// `open`, `close` or `toggle`. Closing on an outside click is decided by
/// the view; the service only stores the flag.
pub async fn style_dropdown(
    State(state): State<AppState>,
    Path(action): Path<DropdownAction>,
) -> Json<CatalogResponse> {
    let (response, event) = {
        let mut session = state.session.write().await;
        match action {
            DropdownAction::Open => session.open_style_dropdown(),
            DropdownAction::Close => session.close_style_dropdown(),
            DropdownAction::Toggle => {
                session.toggle_style_dropdown();
            }
        }
        let event = CatalogEvent::StyleDropdownChanged {
            open: session.is_style_dropdown_open(),
            timestamp: Utc::now(),
        };
        (build_catalog_response(&session), event)
    };

    state.events.emit_lossy(event);
    Json(response)
}

/// POST /api/reload
///
/// Restarts the load pipeline after a failed load. Rejected with 409 while
/// loading or once the catalog is ready.
pub async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let response = {
        let mut session = state.session.write().await;
        session.restart_load()?;
        build_catalog_response(&session)
    };

    info!("Catalog reload requested");
    state.events.emit_lossy(CatalogEvent::CatalogReloadRequested {
        timestamp: Utc::now(),
    });
    spawn_catalog_load(state);

    Ok(Json(response))
}
