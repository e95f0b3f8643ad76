//! Transient shopper-facing notifications.
//!
//! A [`NotificationArea`] stands for the document body every card attaches
//! its messages to; it is shared by all cards on a page. Each card shows
//! messages through its own [`NotificationPresenter`], whose hide/remove
//! timers live in the card's [`TaskScope`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::tasks::TaskScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// An attached notification element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// Set once the hide transition has started (`notification--hide`).
    pub hiding: bool,
    pub shown_at: DateTime<Utc>,
}

impl Notification {
    /// The element's `class` attribute.
    #[must_use]
    pub fn class_name(&self) -> String {
        let mut class = format!("notification notification--{}", self.kind.as_str());
        if self.hiding {
            class.push_str(" notification--hide");
        }
        class
    }
}

#[derive(Debug, Default)]
struct AreaInner {
    next_id: AtomicU64,
    items: Mutex<Vec<Notification>>,
}

/// Shared container notifications are attached to, in attach order.
#[derive(Debug, Clone, Default)]
pub struct NotificationArea {
    inner: Arc<AreaInner>,
}

impl NotificationArea {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<R>(&self, f: impl FnOnce(&mut Vec<Notification>) -> R) -> R {
        let mut items = self
            .inner
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut items)
    }

    /// Attaches a new notification and returns its id.
    pub fn attach(&self, kind: NotificationKind, message: &str) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.with_items(|items| {
            items.push(Notification {
                id,
                kind,
                message: message.to_owned(),
                hiding: false,
                shown_at: Utc::now(),
            });
        });
        id
    }

    /// Starts the hide transition. Returns `false` if `id` is not attached.
    pub fn mark_hiding(&self, id: u64) -> bool {
        self.with_items(|items| {
            items
                .iter_mut()
                .find(|n| n.id == id)
                .map(|n| n.hiding = true)
                .is_some()
        })
    }

    /// Detaches `id`. Returns `false` if it was not attached.
    pub fn remove(&self, id: u64) -> bool {
        self.with_items(|items| {
            let before = items.len();
            items.retain(|n| n.id != id);
            items.len() != before
        })
    }

    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.with_items(|items| items.iter().any(|n| n.id == id))
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.with_items(|items| items.clone())
    }

    /// Messages currently attached, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.with_items(|items| items.iter().map(|n| n.message.clone()).collect())
    }
}

/// Shows notifications on behalf of one card.
#[derive(Debug)]
pub struct NotificationPresenter {
    area: NotificationArea,
    display: Duration,
    fade: Duration,
    tasks: Arc<TaskScope>,
    shown: Mutex<Vec<u64>>,
}

impl NotificationPresenter {
    #[must_use]
    pub fn new(
        area: NotificationArea,
        display: Duration,
        fade: Duration,
        tasks: Arc<TaskScope>,
    ) -> Self {
        Self {
            area,
            display,
            fade,
            tasks,
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Attaches `message`, starts hiding it after the display time and
    /// removes it after the fade. Returns `None` once the owning card is
    /// disposed.
    pub fn show(&self, message: &str, kind: NotificationKind) -> Option<u64> {
        if self.tasks.is_closed() {
            return None;
        }

        let id = self.area.attach(kind, message);
        let area = self.area.clone();
        let (display, fade) = (self.display, self.fade);
        let scheduled = self.tasks.spawn(async move {
            tokio::time::sleep(display).await;
            area.mark_hiding(id);
            tokio::time::sleep(fade).await;
            area.remove(id);
        });
        if !scheduled {
            self.area.remove(id);
            return None;
        }

        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        shown.retain(|existing| self.area.contains(*existing));
        shown.push(id);
        Some(id)
    }

    pub fn success(&self, message: &str) -> Option<u64> {
        self.show(message, NotificationKind::Success)
    }

    /// Logs `message` at error level and shows it.
    pub fn error(&self, message: &str) -> Option<u64> {
        tracing::error!("{message}");
        self.show(message, NotificationKind::Error)
    }

    /// Detaches every notification this presenter attached that is still
    /// showing.
    pub fn dismiss_all(&self) {
        let ids = std::mem::take(&mut *self.shown.lock().unwrap_or_else(PoisonError::into_inner));
        for id in ids {
            self.area.remove(id);
        }
    }
}

impl Drop for NotificationPresenter {
    fn drop(&mut self) {
        self.dismiss_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter(area: &NotificationArea, tasks: &Arc<TaskScope>) -> NotificationPresenter {
        NotificationPresenter::new(
            area.clone(),
            Duration::from_millis(3000),
            Duration::from_millis(300),
            Arc::clone(tasks),
        )
    }

    #[test]
    fn class_name_reflects_kind_and_hide_state() {
        let area = NotificationArea::new();
        let id = area.attach(NotificationKind::Error, "boom");
        assert_eq!(
            area.snapshot()[0].class_name(),
            "notification notification--error"
        );
        assert!(area.mark_hiding(id));
        assert_eq!(
            area.snapshot()[0].class_name(),
            "notification notification--error notification--hide"
        );
        assert!(area.remove(id));
        assert!(!area.remove(id));
        assert!(!area.mark_hiding(id));
    }

    #[tokio::test(start_paused = true)]
    async fn notification_hides_then_disappears() {
        let area = NotificationArea::new();
        let tasks = Arc::new(TaskScope::new());
        let presenter = presenter(&area, &tasks);

        let id = presenter.success("Dodano do koszyka").unwrap();
        let shown = area.snapshot();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NotificationKind::Success);
        assert!(!shown[0].hiding);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(!area.snapshot()[0].hiding, "still fully visible before 3s");

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(area.snapshot()[0].hiding, "hide transition started at 3s");
        assert!(area.contains(id));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(area.snapshot().is_empty(), "removed 300ms after hiding");
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_scope_freezes_pending_timers() {
        let area = NotificationArea::new();
        let tasks = Arc::new(TaskScope::new());
        let presenter = presenter(&area, &tasks);

        presenter.error("Błąd").unwrap();
        tasks.close();
        tokio::time::sleep(Duration::from_millis(5000)).await;

        let shown = area.snapshot();
        assert_eq!(shown.len(), 1, "timer was cancelled, element left for dismiss_all");
        assert!(!shown[0].hiding);

        presenter.dismiss_all();
        assert!(area.snapshot().is_empty());
        assert_eq!(presenter.show("late", NotificationKind::Success), None);
    }

    #[tokio::test]
    async fn dropping_presenter_detaches_its_notifications_only() {
        let area = NotificationArea::new();
        let tasks = Arc::new(TaskScope::new());
        let other = area.attach(NotificationKind::Success, "from another card");

        {
            let presenter = presenter(&area, &tasks);
            presenter.error("mine");
            assert_eq!(area.messages(), vec!["from another card", "mine"]);
        }

        assert_eq!(area.messages(), vec!["from another card"]);
        assert!(area.contains(other));
    }
}
