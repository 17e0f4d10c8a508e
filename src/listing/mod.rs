//! List pages: search, grouping, filtering and form rules shared by the
//! browser pages and the CLI.

pub mod characters;
pub mod conversations;
pub mod memory;
pub mod suggestions;

pub use characters::{CharacterForm, FormError};
pub use conversations::DateGroup;
pub use memory::MemoryStats;
