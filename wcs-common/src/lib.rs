//! # Wine Cheat Sheet Common Library
//!
//! Shared code for the wine cheat sheet service including:
//! - Record normalization from tabular rows
//! - Compound filtering, category/varietal grouping and ordering
//! - Varietal expansion policy and the session state store
//! - Catalog loading (fetch + CSV parse)
//! - Configuration loading
//! - Event types, EventBus and SSE helpers

pub mod config;
pub mod error;
pub mod events;
pub mod expansion;
pub mod filter;
pub mod grouping;
pub mod loader;
pub mod options;
pub mod record;
pub mod session;
pub mod sse;

pub use error::{DataLoadError, Error, Result};
pub use expansion::{apply_expansion_policy, ExpansionState};
pub use filter::{filter_records, matches, ActiveCategory, FilterCriteria};
pub use grouping::{group_records, Bucket, CategorySection, GroupedView};
pub use record::{normalize_rows, ColumnMap, RawRow, WineRecord};
pub use session::{CatalogSession, CatalogView, LoadState};
