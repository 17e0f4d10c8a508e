//! Studio Backend API
//!
//! Paths and failure messages are plain data shared with the browser crate.
//! The native build adds a `reqwest` client and the traits the chat
//! controllers are written against.

pub mod endpoints;

#[cfg(feature = "native")]
pub mod backend;
#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod error;

#[cfg(feature = "native")]
pub use backend::{CharacterBackend, ChatCompletion, ConversationBackend};
#[cfg(feature = "native")]
pub use client::ApiClient;
#[cfg(feature = "native")]
pub use error::{ApiError, Result};
