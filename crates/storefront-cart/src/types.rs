//! Wire types for the storefront cart endpoints (`/cart.js`, `/cart/add.js`,
//! `/cart/change.js`).
//!
//! ### Identifiers
//! `variant_id` arrives as a JSON number on most stores, but some proxies and
//! app embeds re-serialize it as a string. Both are accepted and kept as a
//! `String`, since the card only ever compares it against the
//! `data-variant-id` attribute.
//!
//! ### `item_count`
//! Present on full cart snapshots (`/cart.js`, `/cart/change.js`). The
//! `/cart/add.js` response on some store versions carries only the added
//! `items`, so the count is optional.

use serde::{Deserialize, Deserializer, Serialize};

/// A cart snapshot, or the subset of one returned by a mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Total number of units across all lines.
    #[serde(default)]
    pub item_count: Option<u32>,

    #[serde(default)]
    pub token: Option<String>,
}

impl Cart {
    /// Returns the line holding `variant_id`, if any.
    #[must_use]
    pub fn line_for_variant(&self, variant_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.variant_id == variant_id)
    }
}

/// One cart line.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    #[serde(deserialize_with = "id_as_string")]
    pub variant_id: String,

    pub quantity: u32,

    /// Line key used to address the line in `/cart/change.js`.
    pub key: String,

    #[serde(default)]
    pub title: Option<String>,
}

/// Body of `POST /cart/add.js`.
#[derive(Debug, Serialize)]
pub struct AddItemsRequest<'a> {
    pub items: Vec<AddItem<'a>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AddItem<'a> {
    /// Variant identifier, sent exactly as rendered in the page.
    pub id: &'a str,
    pub quantity: u32,
}

/// Body of `POST /cart/change.js`.
#[derive(Debug, Serialize)]
pub struct ChangeLineRequest<'a> {
    /// Line key of the line to change.
    pub id: &'a str,
    /// Absolute quantity the line should end up with.
    pub quantity: u32,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
