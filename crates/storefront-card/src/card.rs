//! The product card component.
//!
//! A card keeps its committed `quantity` in step with the remote cart. At
//! most one cart request per card is in flight: changes requested while one
//! is pending are dropped, not queued. Local state only moves after the
//! server confirmed the change, so a failed request needs no rollback.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use storefront_cart::{Cart, CartApi};
use storefront_core::messages::{CART_INIT_FAILED, CART_UPDATE_FAILED};
use storefront_core::CardConfig;

use crate::counter::CartCounter;
use crate::lazy_image::{ImageLoading, IntersectionEntry, LazyImageLoader, ObserverOptions};
use crate::notify::{NotificationArea, NotificationPresenter};
use crate::tasks::TaskScope;
use crate::timings::CardTimings;
use crate::view::CardView;

/// Explicit lifecycle of a mounted component.
pub trait Lifecycle {
    type Event;

    /// Loads initial state once the component is attached.
    fn mount(&self) -> impl Future<Output = ()>;

    fn handle_event(&self, event: Self::Event) -> impl Future<Output = ()>;

    /// Cancels pending timers and detaches transient UI. Idempotent; events
    /// after disposal are ignored.
    fn dispose(&self);
}

/// Page-level collaborators shared by every card.
#[derive(Debug, Clone, Default)]
pub struct CardContext {
    pub counter: CartCounter,
    pub notifications: NotificationArea,
    pub timings: CardTimings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increment,
    Decrement,
}

impl QuantityChange {
    #[must_use]
    pub fn delta(self) -> i64 {
        match self {
            QuantityChange::Increment => 1,
            QuantityChange::Decrement => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    Increment,
    Decrement,
    ToggleWishlist,
    Visibility(IntersectionEntry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another cart request of this card is in flight.
    Busy,
    /// The change would leave `[0, max_inventory]` or not move the quantity.
    AtBound,
    /// Decrement requested before the card learned its cart line key. The
    /// quantity is left as is rather than lowered locally without a request.
    MissingItemKey,
    /// The card was rendered without a variant id.
    MissingVariant,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Committed { quantity: u32 },
    Skipped(SkipReason),
    /// The request failed; an error notification was shown unless the card
    /// was disposed meanwhile.
    Failed,
}

#[derive(Debug, Default)]
struct CardState {
    quantity: u32,
    item_key: Option<String>,
}

/// Clears the in-flight flag and re-enables the controls when dropped, so
/// the card recovers even if the request future is abandoned.
struct LoadingGuard<'a, V: CardView> {
    loading: &'a AtomicBool,
    view: &'a V,
}

impl<'a, V: CardView> LoadingGuard<'a, V> {
    fn engage(loading: &'a AtomicBool, view: &'a V) -> Option<Self> {
        if loading.swap(true, Ordering::AcqRel) {
            return None;
        }
        view.set_loading(true);
        Some(Self { loading, view })
    }
}

impl<V: CardView> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.loading.store(false, Ordering::Release);
        self.view.set_loading(false);
    }
}

/// Clamps `current + delta` into `[0, max]`.
fn clamp_target(current: u32, change: QuantityChange, max: u32) -> u32 {
    let target = i64::from(current) + change.delta();
    u32::try_from(target.clamp(0, i64::from(max))).unwrap_or(0)
}

/// One product card bound to a cart backend `A` and markup `V`.
pub struct ProductCard<A, V> {
    api: A,
    view: V,
    config: CardConfig,
    state: Mutex<CardState>,
    loading: AtomicBool,
    disposed: AtomicBool,
    tasks: Arc<TaskScope>,
    presenter: NotificationPresenter,
    counter: CartCounter,
    counter_highlight: Duration,
    last_highlight: AtomicU64,
    image_loader: Option<LazyImageLoader>,
}

impl<A: CartApi, V: CardView> ProductCard<A, V> {
    /// Wires a card to its markup: reads the data attributes and starts
    /// observing visibility if the card has a product image.
    pub fn new(api: A, view: V, context: &CardContext) -> Self {
        let config = view.card_config();
        if config.variant_id.is_none() {
            tracing::warn!("product card rendered without data-variant-id; quantity controls are inert");
        }

        let tasks = Arc::new(TaskScope::new());
        let presenter = NotificationPresenter::new(
            context.notifications.clone(),
            context.timings.notification_display,
            context.timings.notification_fade,
            Arc::clone(&tasks),
        );
        let image_loader = view
            .has_image()
            .then(|| LazyImageLoader::new(ObserverOptions::default()));

        Self {
            api,
            view,
            config,
            state: Mutex::new(CardState::default()),
            loading: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            tasks,
            presenter,
            counter: context.counter.clone(),
            counter_highlight: context.timings.counter_highlight,
            last_highlight: AtomicU64::new(0),
            image_loader,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.lock_state().quantity
    }

    #[must_use]
    pub fn item_key(&self) -> Option<String> {
        self.lock_state().item_key.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, CardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adopts quantity and key of this card's line in `cart`, if present.
    fn adopt_line(&self, cart: &Cart) -> bool {
        let Some(variant_id) = self.config.variant_id.as_deref() else {
            return false;
        };
        let Some(line) = cart.line_for_variant(variant_id) else {
            return false;
        };

        {
            let mut state = self.lock_state();
            state.quantity = line.quantity;
            state.item_key = Some(line.key.clone());
        }
        self.view.set_quantity_value(line.quantity);
        self.view.set_item_key(&line.key);
        true
    }

    fn remember_item_key(&self, cart: &Cart) {
        let Some(variant_id) = self.config.variant_id.as_deref() else {
            return;
        };
        if let Some(line) = cart.line_for_variant(variant_id) {
            self.lock_state().item_key = Some(line.key.clone());
            self.view.set_item_key(&line.key);
        }
    }

    /// Reads the remote cart and adopts this variant's line.
    ///
    /// On failure an error notification is shown and the card keeps its
    /// defaults (quantity 0, no key).
    pub async fn sync_from_cart(&self) {
        match self.api.fetch_cart().await {
            Ok(cart) => {
                let found = self.adopt_line(&cart);
                tracing::debug!(
                    variant_id = self.config.variant_id.as_deref(),
                    found,
                    quantity = self.quantity(),
                    "card state initialised from cart"
                );
            }
            Err(e) => {
                tracing::warn!(
                    variant_id = self.config.variant_id.as_deref(),
                    error = %e,
                    "failed to read cart while mounting product card"
                );
                self.presenter.error(CART_INIT_FAILED);
            }
        }
    }

    /// Applies a ±1 quantity change against the remote cart.
    ///
    /// An increment always adds exactly one unit to the cart; a decrement
    /// sets the line to the clamped target quantity.
    pub async fn apply_delta(&self, change: QuantityChange) -> UpdateOutcome {
        if self.is_disposed() {
            return UpdateOutcome::Skipped(SkipReason::Disposed);
        }
        if self.is_loading() {
            tracing::debug!(?change, "cart request in flight; change dropped");
            return UpdateOutcome::Skipped(SkipReason::Busy);
        }
        let Some(variant_id) = self.config.variant_id.as_deref() else {
            return UpdateOutcome::Skipped(SkipReason::MissingVariant);
        };

        let (current, item_key) = {
            let state = self.lock_state();
            (state.quantity, state.item_key.clone())
        };
        let target = clamp_target(current, change, self.config.max_inventory);
        let moves = match change {
            QuantityChange::Increment => target > current,
            QuantityChange::Decrement => target < current,
        };
        if !moves {
            return UpdateOutcome::Skipped(SkipReason::AtBound);
        }
        if change == QuantityChange::Decrement && item_key.is_none() {
            tracing::debug!(variant_id, "no cart line key recorded; decrement ignored");
            return UpdateOutcome::Skipped(SkipReason::MissingItemKey);
        }

        let Some(_guard) = LoadingGuard::engage(&self.loading, &self.view) else {
            return UpdateOutcome::Skipped(SkipReason::Busy);
        };

        let result = match (change, item_key.as_deref()) {
            (QuantityChange::Increment, _) => self.api.add_variant(variant_id, 1).await,
            (QuantityChange::Decrement, Some(key)) => self.api.change_line(key, target).await,
            (QuantityChange::Decrement, None) => {
                return UpdateOutcome::Skipped(SkipReason::MissingItemKey)
            }
        };

        match result {
            Ok(cart) => {
                self.lock_state().quantity = target;
                if change == QuantityChange::Increment {
                    self.remember_item_key(&cart);
                }
                self.view.set_quantity_value(target);
                if let Some(item_count) = cart.item_count {
                    let generation =
                        self.counter
                            .publish(item_count, self.counter_highlight, &self.tasks);
                    self.last_highlight.store(generation, Ordering::Release);
                }
                tracing::debug!(variant_id, quantity = target, "cart quantity committed");
                UpdateOutcome::Committed { quantity: target }
            }
            Err(e) => {
                tracing::warn!(
                    variant_id,
                    target,
                    error = %e,
                    "cart update failed"
                );
                self.presenter.error(CART_UPDATE_FAILED);
                UpdateOutcome::Failed
            }
        }
    }

    /// Wishlist button hook. No wishlist backend exists, so the request is
    /// only recorded.
    pub fn toggle_wishlist(&self) {
        tracing::info!(
            variant_id = self.config.variant_id.as_deref(),
            "wishlist toggle requested"
        );
    }

    /// Feeds a visibility observation to the image loader. Returns the
    /// strategy applied, which only happens for the first observation.
    pub fn observe_visibility(&self, entry: &IntersectionEntry) -> Option<ImageLoading> {
        let strategy = self.image_loader.as_ref()?.observe(entry)?;
        self.view.set_image_loading(strategy);
        Some(strategy)
    }
}

impl<A: CartApi, V: CardView> Lifecycle for ProductCard<A, V> {
    type Event = CardEvent;

    async fn mount(&self) {
        if self.is_disposed() {
            return;
        }
        self.sync_from_cart().await;
    }

    async fn handle_event(&self, event: CardEvent) {
        if self.is_disposed() {
            return;
        }
        match event {
            CardEvent::Increment => {
                self.apply_delta(QuantityChange::Increment).await;
            }
            CardEvent::Decrement => {
                self.apply_delta(QuantityChange::Decrement).await;
            }
            CardEvent::ToggleWishlist => self.toggle_wishlist(),
            CardEvent::Visibility(entry) => {
                self.observe_visibility(&entry);
            }
        }
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.tasks.close();
        self.presenter.dismiss_all();
        if let Some(loader) = &self.image_loader {
            loader.disconnect();
        }
        let generation = self.last_highlight.load(Ordering::Acquire);
        if generation != 0 {
            self.counter.clear_highlight(generation);
        }
        tracing::debug!(
            variant_id = self.config.variant_id.as_deref(),
            "product card disposed"
        );
    }
}

#[cfg(test)]
#[path = "card_test.rs"]
mod tests;
