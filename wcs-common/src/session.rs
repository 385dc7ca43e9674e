//! Catalog session: the state that outlives a single render
//!
//! Holds the load outcome, the current filter criteria, the expansion flags
//! and the style dropdown visibility. Everything the view needs beyond that
//! (filtered set, grouping) is recomputed by [`CatalogSession::render`].

use tracing::{debug, info, warn};

use crate::error::DataLoadError;
use crate::expansion::{apply_expansion_policy, ExpansionState};
use crate::filter::{filter_records, ActiveCategory, FilterCriteria};
use crate::grouping::{group_records, GroupedView};
use crate::record::WineRecord;
use crate::{Error, Result};

/// Outcome of the one-shot data load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(DataLoadError),
    Ready(Vec<WineRecord>),
}

/// What the presentation layer should draw for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView<'a> {
    Loading,
    Error(&'a DataLoadError),
    Ready {
        view: GroupedView<'a>,
        filtered_count: usize,
        total_count: usize,
    },
}

#[derive(Debug, Clone)]
pub struct CatalogSession {
    load: LoadState,
    criteria: FilterCriteria,
    expansion: ExpansionState,
    style_dropdown_open: bool,
}

impl Default for CatalogSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSession {
    /// Fresh session waiting for its data
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            criteria: FilterCriteria::default(),
            expansion: ExpansionState::new(),
            style_dropdown_open: false,
        }
    }

    /// Session that starts already loaded
    pub fn with_records(wines: Vec<WineRecord>) -> Self {
        let mut session = Self::new();
        session.load = LoadState::Ready(wines);
        session
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn is_style_dropdown_open(&self) -> bool {
        self.style_dropdown_open
    }

    /// Loaded records; empty unless the load succeeded
    pub fn records(&self) -> &[WineRecord] {
        match &self.load {
            LoadState::Ready(wines) => wines,
            _ => &[],
        }
    }

    /// Record the terminal outcome of the load
    ///
    /// Only accepted while loading; the collection is immutable once set.
    pub fn complete_load(
        &mut self,
        outcome: std::result::Result<Vec<WineRecord>, DataLoadError>,
    ) -> Result<()> {
        if self.load != LoadState::Loading {
            warn!("Ignoring load completion: catalog is no longer loading");
            return Err(Error::InvalidState("catalog load already completed".to_string()));
        }

        match outcome {
            Ok(wines) => {
                info!("Catalog ready with {} records", wines.len());
                self.load = LoadState::Ready(wines);
                self.refresh_expansion();
            }
            Err(e) => {
                warn!("Catalog load failed: {}", e);
                self.load = LoadState::Failed(e);
            }
        }
        Ok(())
    }

    /// Return a failed session to `Loading` so the pipeline can run again
    pub fn restart_load(&mut self) -> Result<()> {
        match self.load {
            LoadState::Failed(_) => {
                info!("Restarting catalog load");
                self.load = LoadState::Loading;
                Ok(())
            }
            LoadState::Loading => Err(Error::InvalidState("catalog is already loading".to_string())),
            LoadState::Ready(_) => Err(Error::InvalidState(
                "catalog is loaded and cannot be refetched".to_string(),
            )),
        }
    }

    /// Returns the varietals the expansion policy forced open
    pub fn set_search_term(&mut self, term: impl Into<String>) -> Vec<String> {
        let term = term.into();
        if self.criteria.search_term == term {
            return Vec::new();
        }
        debug!("Search term set to {:?}", term);
        self.criteria.search_term = term;
        self.refresh_expansion()
    }

    /// Switching tabs never changes expansion flags
    pub fn set_active_category(&mut self, category: ActiveCategory) {
        debug!("Active category set to {}", category);
        self.criteria.active_category = category;
    }

    pub fn set_selected_pairing(&mut self, pairing: impl Into<String>) -> Vec<String> {
        let pairing = pairing.into();
        if self.criteria.selected_pairing == pairing {
            return Vec::new();
        }
        debug!("Selected pairing set to {:?}", pairing);
        self.criteria.selected_pairing = pairing;
        self.refresh_expansion()
    }

    /// Add the style if absent, remove it if present
    ///
    /// Returns whether the style is now selected, plus the varietals the
    /// expansion policy forced open.
    pub fn toggle_selected_style(&mut self, style: &str) -> (bool, Vec<String>) {
        let selected = if self.criteria.selected_styles.remove(style) {
            false
        } else {
            self.criteria.selected_styles.insert(style.to_string());
            true
        };
        debug!(style, selected, "Style selection toggled");
        (selected, self.refresh_expansion())
    }

    /// Manual header click: flip one group's flag
    pub fn toggle_group_expansion(&mut self, varietal: &str) -> bool {
        let expanded = self.expansion.toggle(varietal);
        debug!(varietal, expanded, "Group expansion toggled");
        expanded
    }

    pub fn open_style_dropdown(&mut self) {
        self.style_dropdown_open = true;
    }

    pub fn close_style_dropdown(&mut self) {
        self.style_dropdown_open = false;
    }

    pub fn toggle_style_dropdown(&mut self) -> bool {
        self.style_dropdown_open = !self.style_dropdown_open;
        self.style_dropdown_open
    }

    /// Derive the view for the current state
    pub fn render(&self) -> CatalogView<'_> {
        match &self.load {
            LoadState::Loading => CatalogView::Loading,
            LoadState::Failed(e) => CatalogView::Error(e),
            LoadState::Ready(wines) => {
                let filtered = filter_records(wines, &self.criteria);
                let view = group_records(&filtered, self.criteria.active_category);
                CatalogView::Ready {
                    view,
                    filtered_count: filtered.len(),
                    total_count: wines.len(),
                }
            }
        }
    }

    fn refresh_expansion(&mut self) -> Vec<String> {
        let wines = match &self.load {
            LoadState::Ready(wines) => wines,
            _ => return Vec::new(),
        };
        apply_expansion_policy(wines, &self.criteria, &mut self.expansion)
    }
}
