//! The product card component: quantity control synchronised with the
//! remote cart, plus its feedback surfaces (loading state, notifications,
//! cart counter, lazy product image).

pub mod card;
pub mod counter;
pub mod element;
pub mod lazy_image;
pub mod notify;
pub mod tasks;
pub mod timings;
pub mod view;

pub use card::{
    CardContext, CardEvent, Lifecycle, ProductCard, QuantityChange, SkipReason, UpdateOutcome,
};
pub use counter::{CartCounter, CounterState};
pub use element::{CardDom, CardElement};
pub use lazy_image::{ImageLoading, IntersectionEntry, LazyImageLoader, ObserverOptions, Rect};
pub use notify::{Notification, NotificationArea, NotificationKind, NotificationPresenter};
pub use tasks::TaskScope;
pub use timings::CardTimings;
pub use view::CardView;
