//! End-to-end tests of the normalize → filter → group → expand pipeline
//!
//! Exercises the public API the way the HTTP layer drives it.

use std::collections::HashMap;
use wcs_common::{
    apply_expansion_policy, filter_records, group_records, matches, normalize_rows,
    ActiveCategory, Bucket, CatalogSession, CatalogView, ColumnMap, ExpansionState,
    FilterCriteria, RawRow, WineRecord,
};

fn wine(name: &str, category: &str, varietal: &str, style: &str) -> WineRecord {
    WineRecord {
        name: name.to_string(),
        category: category.to_string(),
        varietal: varietal.to_string(),
        style: style.to_string(),
        ..Default::default()
    }
}

fn two_wines() -> Vec<WineRecord> {
    vec![
        wine("Cab A", "red", "Cabernet", "Dry"),
        wine("Chard B", "white", "Chardonnay", "Fruity"),
    ]
}

fn cellar() -> Vec<WineRecord> {
    vec![
        wine("Cab A", "red", "Cabernet", "Dry, Full Bodied"),
        wine("Pinot Uno", "red", "Pinot Noir", "Light, Dry"),
        wine("Cab B", "red", "Cabernet", "Smooth"),
        wine("Chard B", "white", "Chardonnay", "Fruity, Rich"),
        wine("Sauv C", "white", "Sauvignon Blanc", "Crisp, Dry"),
        wine("Mystery", "", "", "Soft"),
        wine("Blush", "rosé", "Grenache", "Off-Dry"),
        wine("House Red", "red", "", "Smooth"),
    ]
}

#[test]
fn test_normalization_totality() {
    let headers = [
        "WINE NAME", "WINE COLOR", "VARIETAL", "SWEETNESS", "ALCOHOL",
        "MADE IN", "SYTLE", "FOOD PAIRING", "DESCRIPTION",
    ];

    // Every subset of columns present, by bitmask
    let rows: Vec<RawRow> = (0u32..(1 << headers.len()))
        .step_by(37)
        .map(|mask| {
            headers
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, h)| (h.to_string(), "X".to_string()))
                .collect::<HashMap<_, _>>()
        })
        .collect();

    let wines = normalize_rows(&rows, &ColumnMap::default());
    assert_eq!(wines.len(), rows.len());

    for (row, wine) in rows.iter().zip(&wines) {
        let expect = |h: &str| if row.contains_key(h) { "X" } else { "" };
        assert_eq!(wine.name, expect("WINE NAME"));
        assert_eq!(wine.category, expect("WINE COLOR").to_lowercase());
        assert_eq!(wine.style, expect("SYTLE"));
        assert_eq!(wine.description, expect("DESCRIPTION"));
    }
}

#[test]
fn test_filter_is_conjunction_of_parts() {
    let wines = cellar();
    let criteria_set = vec![
        FilterCriteria { search_term: "cab".into(), ..Default::default() },
        FilterCriteria {
            search_term: "cab".into(),
            selected_styles: ["Dry".to_string()].into_iter().collect(),
            ..Default::default()
        },
        FilterCriteria {
            active_category: ActiveCategory::White,
            selected_styles: ["Dry".to_string()].into_iter().collect(),
            ..Default::default()
        },
    ];

    for criteria in &criteria_set {
        for w in &wines {
            let parts = [
                FilterCriteria { search_term: criteria.search_term.clone(), ..Default::default() },
                FilterCriteria { active_category: criteria.active_category, ..Default::default() },
                FilterCriteria { selected_pairing: criteria.selected_pairing.clone(), ..Default::default() },
                FilterCriteria { selected_styles: criteria.selected_styles.clone(), ..Default::default() },
            ];
            let each = parts.iter().all(|p| matches(w, p));
            assert_eq!(matches(w, criteria), each, "wine {:?}", w.name);
        }
    }
}

#[test]
fn test_partition_exhaustive_and_lossless() {
    let wines = cellar();
    let filtered: Vec<&WineRecord> = wines.iter().collect();
    let view = group_records(&filtered, ActiveCategory::All);

    assert_eq!(view.total_records(), wines.len());

    for w in &wines {
        let in_red = view
            .section(Bucket::Red)
            .map(|s| s.varietals.values().flatten().any(|r| std::ptr::eq(*r, w)))
            .unwrap_or(false);
        let in_white = view
            .section(Bucket::White)
            .map(|s| s.varietals.values().flatten().any(|r| std::ptr::eq(*r, w)))
            .unwrap_or(false);
        assert!(in_red ^ in_white, "{} must be in exactly one bucket", w.name);
    }

    let white = view.section(Bucket::White).unwrap();
    assert_eq!(white.varietals["Other"][0].name, "Mystery");
}

#[test]
fn test_varietal_keys_strictly_ascending() {
    let wines = cellar();
    let filtered: Vec<&WineRecord> = wines.iter().collect();
    let view = group_records(&filtered, ActiveCategory::All);

    for bucket in Bucket::ALL {
        let keys = view.sorted_varietals(bucket);
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", keys);
    }
    assert_eq!(
        view.sorted_varietals(Bucket::Red),
        vec!["Cabernet", "Other", "Pinot Noir"]
    );
}

#[test]
fn test_scenario_search_cab() {
    let wines = two_wines();
    let criteria = FilterCriteria { search_term: "cab".into(), ..Default::default() };

    let filtered = filter_records(&wines, &criteria);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Cab A");

    let view = group_records(&filtered, criteria.active_category);
    let red = view.section(Bucket::Red).unwrap();
    assert_eq!(red.sorted_varietals(), vec!["Cabernet"]);
    assert_eq!(red.varietals["Cabernet"][0].name, "Cab A");
    assert!(view.section(Bucket::White).is_none());

    let mut expansion = ExpansionState::new();
    apply_expansion_policy(&wines, &criteria, &mut expansion);
    assert!(expansion.is_expanded("Cabernet"));
}

#[test]
fn test_scenario_conjunctive_styles() {
    let wines = two_wines();
    let criteria = FilterCriteria {
        selected_styles: ["Dry", "Fruity"].iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };

    let filtered = filter_records(&wines, &criteria);
    assert!(filtered.is_empty());
    assert!(group_records(&filtered, criteria.active_category).is_empty());

    let mut expansion = ExpansionState::new();
    let opened = apply_expansion_policy(&wines, &criteria, &mut expansion);
    assert!(opened.is_empty());
    assert!(expansion.is_empty());
}

#[test]
fn test_scenario_red_tab_only_red_bucket() {
    let wines = cellar();
    let criteria = FilterCriteria { active_category: ActiveCategory::Red, ..Default::default() };

    let filtered = filter_records(&wines, &criteria);
    let view = group_records(&filtered, criteria.active_category);
    assert_eq!(view.sections.len(), 1);
    assert_eq!(view.sections[0].bucket, Bucket::Red);
    assert_eq!(view.total_records(), 4);
}

#[test]
fn test_expansion_monotonic_while_matching() {
    let mut session = CatalogSession::with_records(cellar());
    session.set_search_term("cab");
    assert!(session.expansion().is_expanded("Cabernet"));

    // Narrowing the filter keeps matching groups open
    session.toggle_selected_style("Dry");
    assert!(session.expansion().is_expanded("Cabernet"));
    session.set_selected_pairing("");
    assert!(session.expansion().is_expanded("Cabernet"));
}

#[test]
fn test_session_render_idempotent() {
    let mut session = CatalogSession::with_records(cellar());
    session.set_search_term("dry");
    session.set_active_category(ActiveCategory::White);

    let first = session.render();
    let second = session.render();
    assert_eq!(first, second);

    match first {
        CatalogView::Ready { view, filtered_count, total_count } => {
            assert_eq!(total_count, 8);
            assert_eq!(filtered_count, view.total_records());
        }
        other => panic!("expected ready view, got {:?}", other),
    }
}
