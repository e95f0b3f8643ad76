//! Localized user-facing messages.
//!
//! The storefront is Polish-language; failures are surfaced to shoppers with
//! these fixed texts rather than the underlying error.

/// Shown when the cart snapshot cannot be read while a card mounts.
pub const CART_INIT_FAILED: &str = "Błąd podczas inicjalizacji stanu koszyka";

/// Shown when adding to or changing a cart line fails.
pub const CART_UPDATE_FAILED: &str = "Błąd podczas aktualizacji koszyka";
