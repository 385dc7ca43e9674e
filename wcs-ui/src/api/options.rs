//! Choice lists for the pairing dropdown and style checklist

use axum::Json;
use serde::Serialize;
use wcs_common::options::{pairing_label, COMMON_PAIRINGS, COMMON_STYLES};

#[derive(Debug, Serialize)]
pub struct PairingOption {
    pub value: &'static str,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub pairings: Vec<PairingOption>,
    pub styles: Vec<&'static str>,
    pub categories: Vec<&'static str>,
}

/// GET /api/options
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        pairings: COMMON_PAIRINGS
            .iter()
            .map(|&value| PairingOption {
                value,
                label: pairing_label(value),
            })
            .collect(),
        styles: COMMON_STYLES.to_vec(),
        categories: vec!["all", "red", "white"],
    })
}
