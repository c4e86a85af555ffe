//! Transient success banners.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{Scheduler, Toast, View};

/// How long a toast stays fully visible.
pub const TOAST_VISIBLE_FOR: Duration = Duration::from_millis(2000);
/// Length of the fade-out before the toast is removed.
pub const TOAST_FADE_FOR: Duration = Duration::from_millis(300);

const TOAST_STYLE: &str = "position: fixed; top: 20px; right: 20px; \
background: #00D9FF; color: #000; padding: 16px 24px; border-radius: 12px; \
font-weight: 600; z-index: 10000; box-shadow: 0 4px 20px rgba(0, 217, 255, 0.6);";

impl Toast {
    /// Toast with the storefront banner style.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: TOAST_STYLE,
        }
    }
}

/// Mounts a toast, fades it after [`TOAST_VISIBLE_FOR`] and removes it after
/// a further [`TOAST_FADE_FOR`].
///
/// There is no queue: overlapping calls produce overlapping banners.
#[derive(Clone)]
pub struct NotificationWidget {
    view: Arc<dyn View>,
    scheduler: Arc<dyn Scheduler>,
}

impl NotificationWidget {
    /// Widget rendering into `view` with timers from `scheduler`.
    pub fn new(view: Arc<dyn View>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self { view, scheduler }
    }

    /// Show `message` as a self-dismissing banner.
    pub fn show(&self, message: impl Into<String>) {
        let id = self.view.mount_toast(&Toast::new(message));
        let view = Arc::clone(&self.view);
        let scheduler = Arc::clone(&self.scheduler);
        self.scheduler.defer(
            TOAST_VISIBLE_FOR,
            Box::pin(async move {
                view.fade_toast(id);
                scheduler.defer(
                    TOAST_FADE_FOR,
                    Box::pin(async move {
                        view.remove_toast(id);
                    }),
                );
            }),
        );
    }
}
