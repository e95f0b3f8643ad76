//! Store origin handling for the cart client.

use reqwest::Url;

use crate::error::CartError;

/// Extracts the scheme+host origin from a store URL.
///
/// Given `"https://shop.example.com/collections/tea"`, returns
/// `"https://shop.example.com"`. Cart endpoints always live at the store
/// root, whatever page the configured URL points at.
///
/// # Errors
///
/// Returns [`CartError::InvalidStoreUrl`] if `store_url` does not parse or
/// has no host-based origin (e.g. `mailto:` or `data:` URLs).
pub fn extract_store_origin(store_url: &str) -> Result<Url, CartError> {
    let parsed = Url::parse(store_url).map_err(|e| CartError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason: e.to_string(),
    })?;

    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(CartError::InvalidStoreUrl {
            store_url: store_url.to_owned(),
            reason: "URL has no host-based origin".to_owned(),
        });
    }

    let serialized = format!("{}/", origin.ascii_serialization());
    Url::parse(&serialized).map_err(|e| CartError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason: format!("origin \"{serialized}\" is not a valid URL base: {e}"),
    })
}
