//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod loading;
pub mod modal;
pub mod sidebar;
pub mod toast;

pub use loading::{ListSkeleton, Loading, RowShape, TypingIndicator};
pub use modal::{ConfirmModal, Modal};
pub use sidebar::Sidebar;
pub use toast::Toast;
