//! Varietal expansion flags and the auto-expand policy
//!
//! Flags are keyed by varietal label alone, so a red and a white group with
//! the same name share one flag. Entries are never removed.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::filter::{matches, FilterCriteria};
use crate::grouping::partition_by_varietal;
use crate::record::WineRecord;

/// Session-lifetime store of group open/closed flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpansionState {
    flags: HashMap<String, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absent entries read as collapsed
    pub fn is_expanded(&self, varietal: &str) -> bool {
        self.flags.get(varietal).copied().unwrap_or(false)
    }

    /// Flip one flag and return its new value
    pub fn toggle(&mut self, varietal: &str) -> bool {
        let flag = self.flags.entry(varietal.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn force_open(&mut self, varietal: &str) {
        self.flags.insert(varietal.to_string(), true);
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Open every varietal group holding at least one matching record
///
/// Groups come from the full, unfiltered collection across both buckets and
/// each record is tested with the category constraint lifted. Nothing is ever
/// forced closed. With no search, pairing or style filter engaged this is a
/// no-op and existing flags (manual toggles included) stay as they are.
///
/// Returns the varietals that were forced open, each once, in bucket then
/// key order.
pub fn apply_expansion_policy(
    wines: &[WineRecord],
    criteria: &FilterCriteria,
    state: &mut ExpansionState,
) -> Vec<String> {
    if !criteria.has_content_filter() {
        return Vec::new();
    }

    let scope = criteria.across_categories();
    let mut opened = Vec::new();

    for (_, groups) in partition_by_varietal(wines) {
        for (varietal, records) in groups {
            if records.iter().any(|wine| matches(wine, &scope)) {
                state.force_open(&varietal);
                // Same name in both buckets is one flag
                if !opened.contains(&varietal) {
                    opened.push(varietal);
                }
            }
        }
    }

    debug!(count = opened.len(), "Expansion policy opened varietal groups");
    opened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ActiveCategory;

    fn wine(name: &str, category: &str, varietal: &str, style: &str) -> WineRecord {
        WineRecord {
            name: name.to_string(),
            category: category.to_string(),
            varietal: varietal.to_string(),
            style: style.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<WineRecord> {
        vec![
            wine("Cab A", "red", "Cabernet", "Dry"),
            wine("Chard B", "white", "Chardonnay", "Fruity"),
        ]
    }

    #[test]
    fn test_toggle_and_default() {
        let mut state = ExpansionState::new();
        assert!(!state.is_expanded("Merlot"));
        assert!(state.toggle("Merlot"));
        assert!(state.is_expanded("Merlot"));
        assert!(!state.toggle("Merlot"));
        assert!(!state.is_expanded("Merlot"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_no_filter_leaves_state_untouched() {
        let mut state = ExpansionState::new();
        state.toggle("Chardonnay");

        let criteria = FilterCriteria {
            active_category: ActiveCategory::Red,
            search_term: "   ".into(),
            ..Default::default()
        };
        let opened = apply_expansion_policy(&sample(), &criteria, &mut state);

        assert!(opened.is_empty());
        assert!(state.is_expanded("Chardonnay"));
        assert!(!state.is_expanded("Cabernet"));
    }

    #[test]
    fn test_search_opens_matching_group() {
        let mut state = ExpansionState::new();
        let criteria = FilterCriteria { search_term: "cab".into(), ..Default::default() };
        let opened = apply_expansion_policy(&sample(), &criteria, &mut state);

        assert_eq!(opened, vec!["Cabernet".to_string()]);
        assert!(state.is_expanded("Cabernet"));
        assert!(!state.is_expanded("Chardonnay"));
    }

    #[test]
    fn test_category_tab_is_ignored_by_policy() {
        let mut state = ExpansionState::new();
        let criteria = FilterCriteria {
            search_term: "chard".into(),
            active_category: ActiveCategory::Red,
            ..Default::default()
        };
        apply_expansion_policy(&sample(), &criteria, &mut state);
        assert!(state.is_expanded("Chardonnay"));
    }

    #[test]
    fn test_never_forces_closed() {
        let mut state = ExpansionState::new();
        state.force_open("Chardonnay");

        let criteria = FilterCriteria { search_term: "cab".into(), ..Default::default() };
        apply_expansion_policy(&sample(), &criteria, &mut state);

        assert!(state.is_expanded("Chardonnay"));
        assert!(state.is_expanded("Cabernet"));
    }

    #[test]
    fn test_conjunctive_styles_open_nothing() {
        let mut state = ExpansionState::new();
        let criteria = FilterCriteria {
            selected_styles: ["Dry", "Fruity"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let opened = apply_expansion_policy(&sample(), &criteria, &mut state);
        assert!(opened.is_empty());
        assert!(state.is_empty());
    }

    #[test]
    fn test_shared_flag_across_buckets() {
        let wines = vec![
            wine("Red Blend", "red", "Blend", ""),
            wine("White Blend", "white", "Blend", ""),
        ];
        let mut state = ExpansionState::new();
        let criteria = FilterCriteria { search_term: "white".into(), ..Default::default() };
        let opened = apply_expansion_policy(&wines, &criteria, &mut state);

        assert_eq!(opened, vec!["Blend".to_string()]);
        assert!(state.is_expanded("Blend"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_shared_varietal_reported_once() {
        let wines = vec![
            wine("Red Blend", "red", "Blend", ""),
            wine("White Blend", "white", "Blend", ""),
            wine("Cab A", "red", "Cabernet", ""),
        ];
        let mut state = ExpansionState::new();
        let criteria = FilterCriteria { search_term: "blend".into(), ..Default::default() };
        let opened = apply_expansion_policy(&wines, &criteria, &mut state);

        assert_eq!(opened, vec!["Blend".to_string()]);
        assert!(state.is_expanded("Blend"));
        assert!(!state.is_expanded("Cabernet"));
    }

    #[test]
    fn test_unclassified_varietal_key_is_other() {
        let wines = vec![wine("House Red", "red", "", "")];
        let mut state = ExpansionState::new();
        let criteria = FilterCriteria { search_term: "house".into(), ..Default::default() };
        apply_expansion_policy(&wines, &criteria, &mut state);
        assert!(state.is_expanded("Other"));
    }
}
