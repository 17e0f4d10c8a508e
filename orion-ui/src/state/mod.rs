//! State Management
//!
//! Global UI state, the theme provider and the `localStorage` adapter.

pub mod global;
pub mod storage;
pub mod theme;

pub use global::{provide_global_state, GlobalState};
pub use storage::BrowserStore;
pub use theme::{provide_theme, ThemeContext};
