//! wcs-ui library - wine cheat sheet catalog service
//!
//! Hosts one catalog session and exposes it to the browser view: the
//! rendered catalog as JSON, mutator routes for every user interaction, and
//! an SSE stream announcing state changes.

use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use wcs_common::events::EventBus;
use wcs_common::loader::CatalogSource;
use wcs_common::{CatalogSession, ColumnMap};

pub mod api;
pub mod loading;

/// Event channel capacity
pub const EVENT_CAPACITY: usize = 256;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single catalog session
    pub session: Arc<RwLock<CatalogSession>>,
    /// Broadcast of session changes for SSE clients
    pub events: Arc<EventBus>,
    /// Where the wine sheet is loaded from
    pub source: CatalogSource,
    /// Source header names
    pub columns: Arc<ColumnMap>,
}

impl AppState {
    /// Create new application state with a session waiting for its data
    pub fn new(source: CatalogSource, columns: ColumnMap) -> Self {
        Self::with_session(CatalogSession::new(), source, columns)
    }

    pub fn with_session(session: CatalogSession, source: CatalogSource, columns: ColumnMap) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            events: Arc::new(EventBus::new(EVENT_CAPACITY)),
            source,
            columns: Arc::new(columns),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/catalog", get(api::get_catalog))
        .route("/api/options", get(api::get_options))
        .route("/api/events", get(api::event_stream))
        .route("/api/criteria/search", post(api::set_search_term))
        .route("/api/criteria/category", post(api::set_active_category))
        .route("/api/criteria/pairing", post(api::set_selected_pairing))
        .route("/api/criteria/styles/toggle", post(api::toggle_selected_style))
        .route("/api/expansion/toggle", post(api::toggle_group_expansion))
        .route("/api/style-dropdown/:action", post(api::style_dropdown))
        .route("/api/reload", post(api::reload_catalog));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
