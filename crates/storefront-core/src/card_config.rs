//! Product card configuration read from the card's data attributes.
//!
//! The quantity container carries two attributes rendered by the storefront
//! theme:
//!
//! - `data-variant-id`: the opaque variant identifier, passed through to the
//!   cart endpoints unchanged.
//! - `data-inventory`: the inventory cap. Themes render it from a number but
//!   it is free text by the time it reaches us, so it is parsed leniently:
//!   the leading integer is taken and anything else falls back to `0`.

use serde::{Deserialize, Serialize};

/// Immutable configuration of one product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Variant identifier. `None` when the attribute is missing or blank.
    pub variant_id: Option<String>,
    /// Maximum purchasable quantity for the variant.
    pub max_inventory: u32,
}

impl CardConfig {
    /// Builds a config from raw `data-variant-id` and `data-inventory` values.
    #[must_use]
    pub fn from_attributes(variant_id: Option<&str>, inventory: Option<&str>) -> Self {
        let variant_id = variant_id
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        Self {
            variant_id,
            max_inventory: parse_inventory(inventory),
        }
    }
}

/// Parses an inventory attribute leniently.
///
/// Leading whitespace and an optional sign are skipped, then the run of ASCII
/// digits is read (`"12 in stock"` is `12`). Missing, non-numeric and negative
/// values yield `0`; values beyond `u32::MAX` saturate.
#[must_use]
pub fn parse_inventory(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);

    if digits.is_empty() || negative {
        return 0;
    }

    digits.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    })
}
