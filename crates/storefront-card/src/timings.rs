use std::time::Duration;

use storefront_core::AppConfig;

/// Fixed delays used by a card's feedback surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTimings {
    /// Time a notification stays fully visible.
    pub notification_display: Duration,
    /// Hide transition before the notification is removed.
    pub notification_fade: Duration,
    /// Time the cart counter keeps `cart-counter--updated`.
    pub counter_highlight: Duration,
}

impl Default for CardTimings {
    fn default() -> Self {
        Self {
            notification_display: Duration::from_millis(3000),
            notification_fade: Duration::from_millis(300),
            counter_highlight: Duration::from_millis(300),
        }
    }
}

impl CardTimings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            notification_display: Duration::from_millis(config.notification_display_ms),
            notification_fade: Duration::from_millis(config.notification_fade_ms),
            counter_highlight: Duration::from_millis(config.counter_highlight_ms),
        }
    }
}
