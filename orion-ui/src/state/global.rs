//! Global Application State
//!
//! Reactive state shared by the sidebar and the pages.

use leptos::*;

/// More than this and the oldest notice is dropped
const MAX_NOTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    /// A value the user may want to copy by hand (share links, colors)
    Copyable,
}

impl NoticeKind {
    fn lifetime_ms(self) -> u32 {
        match self {
            NoticeKind::Success => 3000,
            NoticeKind::Error => 6000,
            NoticeKind::Copyable => 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
    /// Selectable value shown under a [`NoticeKind::Copyable`] notice
    pub value: Option<String>,
}

/// Push `notice` unless an identical one is showing; autosave failures
/// repeat every debounce. Drops the oldest past [`MAX_NOTICES`].
fn enqueue(list: &mut Vec<Notice>, notice: Notice) -> bool {
    let repeated = list
        .iter()
        .any(|n| n.kind == notice.kind && n.text == notice.text && n.value == notice.value);
    if repeated {
        return false;
    }
    list.push(notice);
    if list.len() > MAX_NOTICES {
        list.remove(0);
    }
    true
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Notices on screen, oldest first
    pub notices: RwSignal<Vec<Notice>>,
    next_notice: StoredValue<u64>,
    /// Bumped after a page changes conversations or characters so the
    /// sidebar re-fetches without waiting for a route change
    pub lists_version: RwSignal<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        notices: create_rw_signal(Vec::new()),
        next_notice: store_value(0),
        lists_version: create_rw_signal(0),
    };

    provide_context(state);
}

impl GlobalState {
    fn notify(&self, kind: NoticeKind, text: &str, value: Option<String>) {
        let id = self.next_notice.get_value();
        let notice = Notice {
            id,
            kind,
            text: text.to_string(),
            value,
        };
        let added = self
            .notices
            .try_update(|list| enqueue(list, notice))
            .unwrap_or(false);
        if !added {
            return;
        }
        self.next_notice.set_value(id + 1);

        let state = *self;
        gloo_timers::callback::Timeout::new(kind.lifetime_ms(), move || state.dismiss(id)).forget();
    }

    pub fn show_success(&self, message: &str) {
        self.notify(NoticeKind::Success, message, None);
    }

    pub fn show_error(&self, message: &str) {
        self.notify(NoticeKind::Error, message, None);
    }

    /// Show `value` in a selectable field under `label`
    pub fn show_copyable(&self, label: &str, value: impl Into<String>) {
        self.notify(NoticeKind::Copyable, label, Some(value.into()));
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    /// Ask the sidebar to reload its lists
    pub fn refresh_lists(&self) {
        self.lists_version.update(|v| *v += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: u64, kind: NoticeKind, text: &str) -> Notice {
        Notice {
            id,
            kind,
            text: text.to_string(),
            value: None,
        }
    }

    #[test]
    fn test_repeated_save_failure_shows_once() {
        let mut list = Vec::new();
        assert!(enqueue(&mut list, notice(0, NoticeKind::Error, "Failed to save chat")));
        assert!(!enqueue(&mut list, notice(1, NoticeKind::Error, "Failed to save chat")));
        assert!(enqueue(&mut list, notice(2, NoticeKind::Success, "Failed to save chat")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_oldest_notice_drops_off() {
        let mut list = Vec::new();
        for (id, text) in ["Character saved", "Conversation deleted", "Character activated", "Backend URL saved"]
            .into_iter()
            .enumerate()
        {
            enqueue(&mut list, notice(id as u64, NoticeKind::Success, text));
        }
        let ids: Vec<u64> = list.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_copyable_notices_differ_by_value() {
        let mut list = Vec::new();
        let link = |id, url: &str| Notice {
            value: Some(url.to_string()),
            ..notice(id, NoticeKind::Copyable, "Share link")
        };
        assert!(enqueue(&mut list, link(0, "http://localhost/chat/1")));
        assert!(enqueue(&mut list, link(1, "http://localhost/chat/2")));
        assert!(!enqueue(&mut list, link(2, "http://localhost/chat/2")));
        assert_eq!(NoticeKind::Copyable.lifetime_ms(), 10_000);
    }
}
