//! # Orion
//!
//! Client core for the Orion studio: general chat, roleplay with character
//! personas, a memory bank and a set of small utility tools, all backed by
//! a local HTTP service that owns the data and the language model.
//!
//! ## Modules
//!
//! - [`models`]: records exchanged with the backend
//! - [`api`]: backend paths and messages; the `reqwest` client (native)
//! - [`nav`]: route table, navigation state, sidebar highlighting
//! - [`listing`]: search, grouping and form rules for the list pages
//! - [`session`]: prompt/transcript rules; chat controllers (native)
//! - [`store`]: `localStorage`-style persistence and the theme store
//! - [`tools`]: unit converter, QR encoder, todo list, mood board and friends
//! - [`config`]: TOML + environment configuration (native)
//!
//! With default features off the crate has no runtime dependencies beyond
//! serde, chrono and regex, so the WASM front end shares the same rules.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use orion::api::ApiClient;
//! use orion::nav::Navigator;
//! use orion::session::ChatSession;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Arc::new(ApiClient::new("http://127.0.0.1:8000"));
//!     let mut chat = ChatSession::new(client, Navigator::default(), orion::models::DEFAULT_MODEL);
//!
//!     chat.send("hi").await;
//!     for message in chat.messages() {
//!         println!("{:?}: {}", message.kind, message.content);
//!     }
//! }
//! ```

pub mod api;
#[cfg(feature = "native")]
pub mod config;
pub mod listing;
pub mod models;
pub mod nav;
pub mod session;
pub mod store;
pub mod tools;

// Re-export top-level types for convenience
pub use models::{
    CharacterPersona, CharacterTurn, ChatReply, ChatRequest, Conversation, ConversationMessage,
    MemoryItem, ToolAction,
};

pub use nav::{Navigator, Route};

pub use store::{KeyValueStore, MemoryStore, StoreError, ThemeStore};

#[cfg(feature = "native")]
pub use api::{ApiClient, ApiError};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use session::{CharacterChatSession, ChatSession};

#[cfg(feature = "native")]
pub use store::LocalStore;
