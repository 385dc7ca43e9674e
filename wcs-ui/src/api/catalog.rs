//! Rendered catalog view
//!
//! Flattens the session's derived view into the JSON the browser draws:
//! load status, the criteria echo, and ordered sections of varietal groups
//! each carrying its expansion flag.

use axum::{extract::State, Json};
use serde::Serialize;
use wcs_common::{Bucket, CatalogSession, CatalogView, FilterCriteria, WineRecord};

use crate::AppState;

/// Load failure details
#[derive(Debug, Serialize)]
pub struct LoadErrorInfo {
    pub kind: &'static str,
    pub message: String,
}

/// One varietal group inside a section
#[derive(Debug, Serialize)]
pub struct VarietalResponse {
    pub name: String,
    pub count: usize,
    pub expanded: bool,
    pub wines: Vec<WineRecord>,
}

/// One category bucket
#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub category: Bucket,
    pub label: &'static str,
    pub varietals: Vec<VarietalResponse>,
}

/// Catalog response for GET /api/catalog and every mutator
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// "loading", "error" or "ready"
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LoadErrorInfo>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub criteria: FilterCriteria,
    pub style_dropdown_open: bool,
    pub sections: Vec<SectionResponse>,
}

/// Build the response from the current session state
pub fn build_catalog_response(session: &CatalogSession) -> CatalogResponse {
    let mut response = CatalogResponse {
        status: "loading",
        error: None,
        total_count: 0,
        filtered_count: 0,
        criteria: session.criteria().clone(),
        style_dropdown_open: session.is_style_dropdown_open(),
        sections: Vec::new(),
    };

    match session.render() {
        CatalogView::Loading => {}
        CatalogView::Error(e) => {
            response.status = "error";
            response.error = Some(LoadErrorInfo {
                kind: e.kind(),
                message: e.to_string(),
            });
        }
        CatalogView::Ready { view, filtered_count, total_count } => {
            let expansion = session.expansion();
            response.status = "ready";
            response.total_count = total_count;
            response.filtered_count = filtered_count;
            response.sections = view
                .sections
                .into_iter()
                .map(|section| SectionResponse {
                    category: section.bucket,
                    label: section.bucket.label(),
                    varietals: section
                        .varietals
                        .into_iter()
                        .map(|(name, wines)| VarietalResponse {
                            expanded: expansion.is_expanded(&name),
                            count: wines.len(),
                            wines: wines.into_iter().cloned().collect(),
                            name,
                        })
                        .collect(),
                })
                .collect();
        }
    }

    response
}

/// GET /api/catalog
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let session = state.session.read().await;
    Json(build_catalog_response(&session))
}
