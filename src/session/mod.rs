//! Chat Sessions
//!
//! Prompt and transcript rules are plain functions shared with the browser
//! front end. The native controllers drive them against a backend.

pub mod prompt;
pub mod transcript;

#[cfg(feature = "native")]
pub mod character;
#[cfg(feature = "native")]
pub mod chat;
#[cfg(feature = "native")]
pub mod debounce;

pub use prompt::{build_prompt, HISTORY_TURNS};
pub use transcript::{greeting_turns, opening_turns, should_save, CHARACTER_FALLBACK, CHAT_FALLBACK};

#[cfg(feature = "native")]
pub use character::{CharacterChatSession, CharacterTiming};
#[cfg(feature = "native")]
pub use chat::{CancelHandle, ChatSession, ChatState, SendOutcome};
#[cfg(feature = "native")]
pub use debounce::Debouncer;
