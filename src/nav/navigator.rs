//! Navigation State
//!
//! The one owned piece of state saying which page (and therefore which
//! conversation or character) is current. Pages write to it, the sidebar
//! reads from it; the URL is only a projection of it.

use std::sync::{Arc, Mutex, MutexGuard};

use super::route::{Resolution, Route};

#[derive(Debug)]
struct NavState {
    current: Route,
    back: Vec<Route>,
    /// Bumped on every change so observers can tell stale snapshots apart
    version: u64,
}

/// Shared handle to the navigation state
#[derive(Debug, Clone)]
pub struct Navigator {
    inner: Arc<Mutex<NavState>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Chat(None))
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NavState {
                current: start,
                back: Vec::new(),
                version: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        // A panic while holding the lock leaves the route itself intact
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn current(&self) -> Route {
        self.lock().current.clone()
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Navigate to a path, following legacy redirects
    pub fn open(&self, path: &str) -> Route {
        match Route::resolve(path) {
            Resolution::Render(route) => self.push(route.clone()),
            Resolution::Redirect(route) => self.replace(route.clone()),
        }
        self.current()
    }

    /// New history entry
    pub fn push(&self, route: Route) {
        let mut state = self.lock();
        let previous = std::mem::replace(&mut state.current, route);
        state.back.push(previous);
        state.version += 1;
        tracing::debug!(route = %state.current, "navigate");
    }

    /// Rewrite the current entry without adding history
    pub fn replace(&self, route: Route) {
        let mut state = self.lock();
        state.current = route;
        state.version += 1;
        tracing::debug!(route = %state.current, "replace location");
    }

    /// Go back one entry; returns false at the start of history
    pub fn back(&self) -> bool {
        let mut state = self.lock();
        match state.back.pop() {
            Some(previous) => {
                state.current = previous;
                state.version += 1;
                true
            }
            None => false,
        }
    }

    /// Conversation id of the open chat page, if any
    pub fn current_conversation(&self) -> Option<i64> {
        match self.lock().current {
            Route::Chat(id) => id,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let nav = Navigator::default();
        nav.push(Route::Settings);
        assert_eq!(nav.current(), Route::Settings);
        assert!(nav.back());
        assert_eq!(nav.current(), Route::Chat(None));
        assert!(!nav.back());
    }

    #[test]
    fn test_replace_keeps_history_length() {
        let nav = Navigator::new(Route::Conversations);
        nav.push(Route::Chat(None));
        nav.replace(Route::Chat(Some(5)));
        assert_eq!(nav.current_conversation(), Some(5));
        assert!(nav.back());
        assert_eq!(nav.current(), Route::Conversations);
    }

    #[test]
    fn test_open_follows_redirects() {
        let nav = Navigator::new(Route::Settings);
        assert_eq!(nav.open("/char/luna"), Route::CharacterChat("luna".into()));
        // the redirect replaced the entry instead of pushing one
        assert!(!nav.back());
    }

    #[test]
    fn test_clones_share_state() {
        let nav = Navigator::default();
        let other = nav.clone();
        other.push(Route::Memory);
        assert_eq!(nav.current(), Route::Memory);
        assert_eq!(nav.version(), 1);
    }
}
