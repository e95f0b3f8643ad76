//! In-memory model of a product card's markup.
//!
//! [`CardElement`] mirrors the theme snippet the component is mounted on:
//!
//! ```text
//! <product-card class="...">
//!   <img class="product-card__image" loading="...">
//!   <button class="product-card__wishlist">
//!   <div class="product-card__quantity" data-variant-id="..." data-inventory="...">
//!     <button class="minus"> <input class="quantity-input" data-item-key="..."> <button class="plus">
//!   </div>
//! </product-card>
//! ```
//!
//! Every child is optional, as in the real markup.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use storefront_core::CardConfig;

use crate::lazy_image::ImageLoading;
use crate::view::CardView;

/// Class toggled on the card while a cart request is in flight.
pub const LOADING_CLASS: &str = "is-loading";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityContainer {
    /// `data-variant-id`
    pub variant_id: Option<String>,
    /// `data-inventory`
    pub inventory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityInput {
    pub value: String,
    pub disabled: bool,
    /// `data-item-key`
    pub item_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Control {
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductImage {
    /// `loading` attribute; `None` until the visibility observer has fired.
    pub loading: Option<ImageLoading>,
}

/// Snapshot of the card markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDom {
    pub classes: BTreeSet<String>,
    pub quantity_container: Option<QuantityContainer>,
    pub quantity_input: Option<QuantityInput>,
    pub plus: Option<Control>,
    pub minus: Option<Control>,
    pub wishlist: Option<Control>,
    pub image: Option<ProductImage>,
}

impl CardDom {
    /// Markup of a fully rendered card for `variant_id` with the given raw
    /// `data-inventory` value.
    #[must_use]
    pub fn rendered(variant_id: &str, inventory: &str) -> Self {
        Self {
            classes: BTreeSet::from(["product-card".to_owned()]),
            quantity_container: Some(QuantityContainer {
                variant_id: Some(variant_id.to_owned()),
                inventory: Some(inventory.to_owned()),
            }),
            quantity_input: Some(QuantityInput {
                value: "0".to_owned(),
                ..QuantityInput::default()
            }),
            plus: Some(Control::default()),
            minus: Some(Control::default()),
            wishlist: Some(Control::default()),
            image: Some(ProductImage::default()),
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Shared, mutable card markup implementing [`CardView`].
#[derive(Debug, Default)]
pub struct CardElement {
    dom: Mutex<CardDom>,
}

impl CardElement {
    #[must_use]
    pub fn new(dom: CardDom) -> Self {
        Self {
            dom: Mutex::new(dom),
        }
    }

    /// Shorthand for `CardElement::new(CardDom::rendered(..))`.
    #[must_use]
    pub fn rendered(variant_id: &str, inventory: &str) -> Self {
        Self::new(CardDom::rendered(variant_id, inventory))
    }

    /// Copies the current markup.
    #[must_use]
    pub fn snapshot(&self) -> CardDom {
        self.dom.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Current `.quantity-input` value, if the input exists.
    #[must_use]
    pub fn quantity_value(&self) -> Option<String> {
        self.snapshot().quantity_input.map(|input| input.value)
    }

    fn with_dom<R>(&self, f: impl FnOnce(&mut CardDom) -> R) -> R {
        let mut dom = self.dom.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut dom)
    }
}

impl CardView for CardElement {
    fn card_config(&self) -> CardConfig {
        self.with_dom(|dom| {
            let container = dom.quantity_container.as_ref();
            CardConfig::from_attributes(
                container.and_then(|c| c.variant_id.as_deref()),
                container.and_then(|c| c.inventory.as_deref()),
            )
        })
    }

    fn has_image(&self) -> bool {
        self.with_dom(|dom| dom.image.is_some())
    }

    fn set_quantity_value(&self, quantity: u32) {
        self.with_dom(|dom| {
            if let Some(input) = dom.quantity_input.as_mut() {
                input.value = quantity.to_string();
            }
        });
    }

    fn set_item_key(&self, key: &str) {
        self.with_dom(|dom| {
            if let Some(input) = dom.quantity_input.as_mut() {
                input.item_key = Some(key.to_owned());
            }
        });
    }

    fn set_loading(&self, loading: bool) {
        self.with_dom(|dom| {
            for control in [dom.plus.as_mut(), dom.minus.as_mut()].into_iter().flatten() {
                control.disabled = loading;
            }
            if let Some(input) = dom.quantity_input.as_mut() {
                input.disabled = loading;
            }
            if loading {
                dom.classes.insert(LOADING_CLASS.to_owned());
            } else {
                dom.classes.remove(LOADING_CLASS);
            }
        });
    }

    fn set_image_loading(&self, loading: ImageLoading) {
        self.with_dom(|dom| {
            if let Some(image) = dom.image.as_mut() {
                image.loading = Some(loading);
            }
        });
    }
}
