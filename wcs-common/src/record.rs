//! Wine record entity and the row normalizer
//!
//! Raw rows arrive keyed by whatever headers the source sheet carries. The
//! normalizer maps them onto a fixed [`WineRecord`] shape in which every
//! field is a defined string, so nothing downstream needs null checks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::grouping::Bucket;

/// One parsed source row: header → cell text
pub type RawRow = HashMap<String, String>;

/// Label used for records with an empty varietal
pub const OTHER_VARIETAL: &str = "Other";

/// Normalized wine entity
///
/// Immutable once created. `category` holds the lowercased color column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineRecord {
    pub name: String,
    pub category: String,
    pub varietal: String,
    pub sweetness: String,
    pub alcohol: String,
    pub region: String,
    pub style: String,
    pub pairings: String,
    pub description: String,
}

impl WineRecord {
    /// Build a record from one raw row, defaulting absent columns to ""
    pub fn from_row(row: &RawRow, columns: &ColumnMap) -> Self {
        let cell = |header: &str| row.get(header).cloned().unwrap_or_default();

        let style = columns
            .style
            .iter()
            .filter_map(|header| row.get(header))
            .find(|value| !value.is_empty())
            .cloned()
            .unwrap_or_default();

        Self {
            name: cell(&columns.name),
            category: cell(&columns.color).to_lowercase(),
            varietal: cell(&columns.varietal),
            sweetness: cell(&columns.sweetness),
            alcohol: cell(&columns.alcohol),
            region: cell(&columns.region),
            style,
            pairings: cell(&columns.pairings),
            description: cell(&columns.description),
        }
    }

    /// Grouping key: the varietal, or "Other" when unclassified
    pub fn varietal_label(&self) -> &str {
        if self.varietal.is_empty() {
            OTHER_VARIETAL
        } else {
            &self.varietal
        }
    }

    /// Partition bucket: exactly "red" is red, everything else is white
    pub fn bucket(&self) -> Bucket {
        if self.category == "red" {
            Bucket::Red
        } else {
            Bucket::White
        }
    }
}

/// Source header names for each record field
///
/// `style` is a list of aliases tried in order; the production sheet spells
/// the header "SYTLE".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub name: String,
    pub color: String,
    pub varietal: String,
    pub sweetness: String,
    pub alcohol: String,
    pub region: String,
    pub style: Vec<String>,
    pub pairings: String,
    pub description: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            name: "WINE NAME".to_string(),
            color: "WINE COLOR".to_string(),
            varietal: "VARIETAL".to_string(),
            sweetness: "SWEETNESS".to_string(),
            alcohol: "ALCOHOL".to_string(),
            region: "MADE IN".to_string(),
            style: vec!["SYTLE".to_string(), "STYLE".to_string()],
            pairings: "FOOD PAIRING".to_string(),
            description: "DESCRIPTION".to_string(),
        }
    }
}

/// Normalize every raw row into a [`WineRecord`], preserving order
pub fn normalize_rows(rows: &[RawRow], columns: &ColumnMap) -> Vec<WineRecord> {
    rows.iter()
        .map(|row| WineRecord::from_row(row, columns))
        .collect()
}
