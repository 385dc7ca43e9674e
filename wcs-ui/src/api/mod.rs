//! HTTP API handlers for wcs-ui

pub mod catalog;
pub mod controls;
pub mod error;
pub mod health;
pub mod options;
pub mod sse;
pub mod ui;

pub use catalog::get_catalog;
pub use controls::{
    reload_catalog, set_active_category, set_search_term, set_selected_pairing, style_dropdown,
    toggle_group_expansion, toggle_selected_style,
};
pub use error::ApiError;
pub use health::health_routes;
pub use options::get_options;
pub use sse::event_stream;
pub use ui::{serve_app_js, serve_index};
