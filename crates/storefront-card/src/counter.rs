//! Cart item-count indicator shared by every card on a page.
//!
//! Cards publish the `item_count` from each successful cart mutation; the
//! header badge (or anything else) subscribes to the latest value. The last
//! publication wins.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::tasks::TaskScope;

/// Marker class present while the counter is highlighted.
pub const UPDATED_CLASS: &str = "cart-counter--updated";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    /// Latest published count; `None` until the first publication.
    pub item_count: Option<u32>,
    pub highlighted: bool,
    /// Incremented on every publication.
    pub generation: u64,
}

impl CounterState {
    /// The counter element's `class` attribute.
    #[must_use]
    pub fn class_name(&self) -> String {
        if self.highlighted {
            format!("cart-counter {UPDATED_CLASS}")
        } else {
            "cart-counter".to_owned()
        }
    }

    /// The counter element's text.
    #[must_use]
    pub fn text(&self) -> String {
        self.item_count.map(|c| c.to_string()).unwrap_or_default()
    }
}

/// Publish/subscribe handle to the cart counter. Clones share one channel.
#[derive(Debug, Clone)]
pub struct CartCounter {
    tx: Arc<watch::Sender<CounterState>>,
}

impl Default for CartCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CartCounter {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CounterState::default());
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CounterState> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> CounterState {
        *self.tx.borrow()
    }

    /// Sets the count and highlights the counter; the highlight is removed
    /// after `highlight` by a task in `tasks`. If `tasks` is closed the count
    /// is still set but the highlight is dropped at once. Returns the
    /// publication's generation.
    pub fn publish(&self, item_count: u32, highlight: Duration, tasks: &TaskScope) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.item_count = Some(item_count);
            state.highlighted = true;
            generation = state.generation;
        });
        tracing::debug!(item_count, generation, "cart counter updated");

        let counter = self.clone();
        let scheduled = tasks.spawn(async move {
            tokio::time::sleep(highlight).await;
            counter.clear_highlight(generation);
        });
        if !scheduled {
            self.clear_highlight(generation);
        }
        generation
    }

    /// Removes the highlight if it still belongs to `generation`. A newer
    /// publication keeps its own highlight.
    pub fn clear_highlight(&self, generation: u64) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation == generation && state.highlighted {
                state.highlighted = false;
                true
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn publish_highlights_then_clears() {
        let counter = CartCounter::new();
        let tasks = TaskScope::new();

        counter.publish(4, Duration::from_millis(300), &tasks);
        let state = counter.current();
        assert_eq!(state.text(), "4");
        assert_eq!(state.class_name(), "cart-counter cart-counter--updated");

        tokio::time::sleep(Duration::from_millis(301)).await;
        let state = counter.current();
        assert!(!state.highlighted);
        assert_eq!(state.class_name(), "cart-counter");
        assert_eq!(state.item_count, Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn older_timer_does_not_cut_newer_highlight_short() {
        let counter = CartCounter::new();
        let tasks = TaskScope::new();

        counter.publish(1, Duration::from_millis(300), &tasks);
        tokio::time::sleep(Duration::from_millis(200)).await;
        counter.publish(2, Duration::from_millis(300), &tasks);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(counter.current().highlighted, "first timer fired but must not clear");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!counter.current().highlighted);
        assert_eq!(counter.current().item_count, Some(2));
    }

    #[tokio::test]
    async fn publish_on_closed_scope_sets_count_without_highlight() {
        let counter = CartCounter::new();
        let tasks = TaskScope::new();
        tasks.close();

        counter.publish(3, Duration::from_millis(300), &tasks);

        let state = counter.current();
        assert_eq!(state.item_count, Some(3));
        assert!(!state.highlighted, "no timer could remove it");
    }

    #[tokio::test]
    async fn subscribers_see_latest_count() {
        let counter = CartCounter::new();
        let mut rx = counter.subscribe();
        let tasks = TaskScope::new();

        counter.publish(7, Duration::from_secs(60), &tasks);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().item_count, Some(7));
        tasks.close();
    }

    #[test]
    fn empty_counter_renders_blank() {
        let state = CounterState::default();
        assert_eq!(state.text(), "");
        assert_eq!(state.class_name(), "cart-counter");
    }
}
