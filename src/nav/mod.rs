//! Navigation
//!
//! - [`route`]: path ⇄ page table with legacy redirects
//! - [`navigator`]: owned current-location state with history
//! - [`sidebar`]: active highlighting and recent lists

pub mod navigator;
pub mod route;
pub mod sidebar;

pub use navigator::Navigator;
pub use route::{share_url, Resolution, Route, ToolPage};
pub use sidebar::{redirect_after_delete, ActiveChat, SidebarState, RECENT_LIMIT};
