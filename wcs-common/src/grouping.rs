//! Partitioning of filtered records into category buckets and varietal groups
//!
//! The split is binary: a record is red only when its category is exactly
//! "red"; everything else, including blank or unknown colors, goes white.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::filter::ActiveCategory;
use crate::record::WineRecord;

/// One of the two category buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Red,
    White,
}

impl Bucket {
    /// Buckets in display order
    pub const ALL: [Bucket; 2] = [Bucket::Red, Bucket::White];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Red => "red",
            Bucket::White => "white",
        }
    }

    /// Section heading
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Red => "Red Wines",
            Bucket::White => "White Wines",
        }
    }

    /// Whether the active tab allows this bucket's section to be shown
    pub fn visible_under(&self, tab: ActiveCategory) -> bool {
        !matches!(
            (self, tab),
            (Bucket::Red, ActiveCategory::White) | (Bucket::White, ActiveCategory::Red)
        )
    }
}

/// Varietal name → records, iterated in code-point ascending key order
pub type VarietalGroups<'a> = BTreeMap<String, Vec<&'a WineRecord>>;

/// Non-empty bucket with its varietal groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySection<'a> {
    pub bucket: Bucket,
    pub varietals: VarietalGroups<'a>,
}

impl<'a> CategorySection<'a> {
    /// Varietal keys, strictly ascending
    pub fn sorted_varietals(&self) -> Vec<&str> {
        self.varietals.keys().map(String::as_str).collect()
    }

    pub fn record_count(&self) -> usize {
        self.varietals.values().map(Vec::len).sum()
    }
}

/// Grouped, ordered structure handed to the presentation layer
///
/// Sections appear red first, then white. Empty buckets are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedView<'a> {
    pub sections: Vec<CategorySection<'a>>,
}

impl<'a> GroupedView<'a> {
    pub fn section(&self, bucket: Bucket) -> Option<&CategorySection<'a>> {
        self.sections.iter().find(|s| s.bucket == bucket)
    }

    /// Varietal keys of one bucket; empty when the bucket is omitted
    pub fn sorted_varietals(&self, bucket: Bucket) -> Vec<&str> {
        self.section(bucket)
            .map(CategorySection::sorted_varietals)
            .unwrap_or_default()
    }

    pub fn total_records(&self) -> usize {
        self.sections.iter().map(CategorySection::record_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Split records into red/white buckets and group each by varietal label
///
/// Relative order inside a varietal group follows the input order. Both
/// buckets are always returned, possibly empty.
pub fn partition_by_varietal<'a, I>(wines: I) -> [(Bucket, VarietalGroups<'a>); 2]
where
    I: IntoIterator<Item = &'a WineRecord>,
{
    let mut red = VarietalGroups::new();
    let mut white = VarietalGroups::new();

    for wine in wines {
        let groups = match wine.bucket() {
            Bucket::Red => &mut red,
            Bucket::White => &mut white,
        };
        groups
            .entry(wine.varietal_label().to_string())
            .or_default()
            .push(wine);
    }

    [(Bucket::Red, red), (Bucket::White, white)]
}

/// Build the grouped view from an already filtered sequence
///
/// Buckets with no records, and buckets hidden by the active tab, contribute
/// no section.
pub fn group_records<'a>(filtered: &[&'a WineRecord], active_category: ActiveCategory) -> GroupedView<'a> {
    let sections = partition_by_varietal(filtered.iter().copied())
        .into_iter()
        .filter(|(bucket, groups)| !groups.is_empty() && bucket.visible_under(active_category))
        .map(|(bucket, varietals)| CategorySection { bucket, varietals })
        .collect();

    GroupedView { sections }
}
