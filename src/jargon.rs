//! Community shorthand for item names.
//!
//! Players rarely type "Extreme Dragonbane Charm" in full; the table below
//! maps the abbreviations in common use to the canonical marketplace names.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Alias -> canonical item name. Keys are matched case-sensitively.
static JARGON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("cc", "Condensed Creativity"),
        ("cf", "Champion's Fire"),
        ("dbc", "Dragonbane Charm"),
        ("edbc", "Extreme Dragonbane Charm"),
        ("esb", "Empowered SUPER|brie+"),
        ("hat", "Magical Holiday Hat"),
        ("rib", "Kalor'ignis Rib"),
        ("sb", "SUPER|brie+"),
        ("sdbc", "Super Dragonbane Charm"),
        ("udbc", "Ultimate Dragonbane Charm"),
        ("wt", "Wild Tonic"),
    ])
});

/// Expand a community alias to its canonical item name.
///
/// Unknown input passes through unchanged, so callers can feed every query
/// through here unconditionally.
pub fn resolve(input: &str) -> &str {
    JARGON.get(input).copied().unwrap_or(input)
}
