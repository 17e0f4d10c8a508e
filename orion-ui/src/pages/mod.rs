//! Pages
//!
//! Top-level page components for each route.

pub mod character_chat;
pub mod character_detail;
pub mod character_form;
pub mod characters;
pub mod chat;
pub mod conversations;
pub mod memory_bank;
pub mod settings;
pub mod tools;

pub use character_chat::CharacterChat;
pub use character_detail::CharacterDetail;
pub use character_form::{CreateCharacter, EditCharacter};
pub use characters::Characters;
pub use chat::Chat;
pub use conversations::Conversations;
pub use memory_bank::MemoryBank;
pub use settings::Settings;
