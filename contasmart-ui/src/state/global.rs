//! Global Application State
//!
//! Reactive state management using Leptos signals.

use contasmart::notify::{Level, Notification};
use leptos::*;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Result of the last health check, `None` while unknown
    pub api_online: RwSignal<Option<bool>>,
    /// A calculation is in flight
    pub loading: RwSignal<bool>,
    /// Floating message; a new one replaces the previous
    pub notification: RwSignal<Option<Notification>>,
    /// Bumped whenever the local history changes
    pub history_version: RwSignal<u32>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        api_online: create_rw_signal(None),
        loading: create_rw_signal(false),
        notification: create_rw_signal(None),
        history_version: create_rw_signal(0),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a notification; it clears itself after its time-to-live
    pub fn notify(&self, notification: Notification) {
        let ttl_ms = notification.level.ttl().num_milliseconds().max(0) as u32;
        let created_at = notification.created_at;
        self.notification.set(Some(notification));

        let signal = self.notification;
        gloo_timers::callback::Timeout::new(ttl_ms, move || {
            // Leave newer notifications alone
            if signal.get_untracked().is_some_and(|n| n.created_at == created_at) {
                signal.set(None);
            }
        })
        .forget();
    }

    pub fn show_success(&self, message: &str) {
        self.notify(Notification::new(Level::Success, message));
    }

    pub fn show_info(&self, message: &str) {
        self.notify(Notification::new(Level::Info, message));
    }

    pub fn show_error(&self, message: &str) {
        self.notify(Notification::new(Level::Danger, message));
    }

    pub fn dismiss(&self) {
        self.notification.set(None);
    }

    /// Show the loading overlay until the guard is dropped
    pub fn start_loading(&self) -> LoadingGuard {
        self.loading.set(true);
        LoadingGuard {
            loading: self.loading,
        }
    }

    pub fn history_changed(&self) {
        self.history_version.update(|v| *v = v.wrapping_add(1));
    }
}

/// Hides the loading overlay on drop
pub struct LoadingGuard {
    loading: RwSignal<bool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.loading.set(false);
    }
}
