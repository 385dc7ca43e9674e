//! Fixed choice lists offered by the pairing dropdown and style checklist

/// Food pairings, stored lowercase and matched as substrings
pub const COMMON_PAIRINGS: [&str; 30] = [
    "beef", "bison", "blue cheese", "burgers", "brie", "calamari",
    "chicken", "desserts", "escargot", "filet", "fish", "fresh salads",
    "garlic bread", "goat cheese", "lamb", "lobster", "mussels",
    "mushrooms", "oysters", "pad thai", "parmesan chicken", "pasta",
    "ribs", "salmon", "scallops", "seafood", "shrimp", "sirloin",
    "steak", "steamed fish",
];

/// Wine styles for the multi-select checklist
pub const COMMON_STYLES: [&str; 12] = [
    "Crisp",
    "Dry",
    "Fruity",
    "Sweet",
    "Smooth",
    "Rich",
    "Full Bodied",
    "Dry-Medium Bodied",
    "Light",
    "Medium Bodied",
    "Off-Dry",
    "Soft",
];

/// Display label for a pairing: first character uppercased
pub fn pairing_label(pairing: &str) -> String {
    let mut chars = pairing.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
