//! Compound filter over normalized wine records
//!
//! One predicate, [`matches`], decides visibility. The expansion policy calls
//! the same function with the category constraint lifted, so the two call
//! sites cannot drift apart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::record::WineRecord;
use crate::Error;

/// Category tab selected in the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveCategory {
    #[default]
    All,
    Red,
    White,
}

impl ActiveCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveCategory::All => "all",
            ActiveCategory::Red => "red",
            ActiveCategory::White => "white",
        }
    }
}

impl fmt::Display for ActiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ActiveCategory::All),
            "red" => Ok(ActiveCategory::Red),
            "white" => Ok(ActiveCategory::White),
            other => Err(Error::InvalidInput(format!(
                "Unknown category '{}' (expected all, red or white)",
                other
            ))),
        }
    }
}

/// Filter inputs for one render cycle
///
/// Empty strings and an empty style set mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub active_category: ActiveCategory,
    pub selected_pairing: String,
    pub selected_styles: BTreeSet<String>,
}

impl FilterCriteria {
    /// True when any of search, pairing or style constrains the results
    ///
    /// The category tab does not count.
    pub fn has_content_filter(&self) -> bool {
        !self.search_term.trim().is_empty()
            || !self.selected_pairing.is_empty()
            || !self.selected_styles.is_empty()
    }

    /// Same criteria with the category constraint set to match anything
    pub fn across_categories(&self) -> FilterCriteria {
        FilterCriteria {
            active_category: ActiveCategory::All,
            ..self.clone()
        }
    }

    fn matches_search(&self, wine: &WineRecord) -> bool {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&wine.name, &wine.description, &wine.region, &wine.varietal]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_pairing(&self, wine: &WineRecord) -> bool {
        self.selected_pairing.is_empty()
            || contains_ignore_case(&wine.pairings, &self.selected_pairing)
    }

    /// Conjunctive: every selected style must appear in the record's style
    fn matches_styles(&self, wine: &WineRecord) -> bool {
        self.selected_styles
            .iter()
            .all(|style| contains_ignore_case(&wine.style, style))
    }

    fn matches_category(&self, wine: &WineRecord) -> bool {
        match self.active_category {
            ActiveCategory::All => true,
            category => wine.category == category.as_str(),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether `wine` satisfies all four parts of `criteria`
pub fn matches(wine: &WineRecord, criteria: &FilterCriteria) -> bool {
    criteria.matches_search(wine)
        && criteria.matches_pairing(wine)
        && criteria.matches_styles(wine)
        && criteria.matches_category(wine)
}

/// Records passing [`matches`], in source order
pub fn filter_records<'a>(wines: &'a [WineRecord], criteria: &FilterCriteria) -> Vec<&'a WineRecord> {
    wines.iter().filter(|wine| matches(wine, criteria)).collect()
}
