use storefront_core::CardConfig;

use crate::lazy_image::ImageLoading;

/// The parts of the card's markup the component reads and writes.
///
/// Lookups that find nothing are not errors: a card rendered without an
/// image or without a wishlist button simply never touches them.
pub trait CardView: Send + Sync {
    /// Reads `data-variant-id` and `data-inventory` from the quantity
    /// container.
    fn card_config(&self) -> CardConfig;

    /// Whether the card contains a `.product-card__image`.
    fn has_image(&self) -> bool;

    /// Writes the committed quantity to `.quantity-input`.
    fn set_quantity_value(&self, quantity: u32);

    /// Records the cart line key on `.quantity-input` as `data-item-key`.
    fn set_item_key(&self, key: &str);

    /// Toggles `disabled` on the quantity controls and the `is-loading`
    /// class on the card.
    fn set_loading(&self, loading: bool);

    fn set_image_loading(&self, loading: ImageLoading);
}
