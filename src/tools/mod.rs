//! Utility Tools
//!
//! Self-contained widgets behind `/tool/*`. Everything here is local state;
//! only the novel generator talks to the backend, and only through the
//! request bodies built in [`novel`].

pub mod color;
pub mod media;
pub mod mood_board;
pub mod novel;
pub mod qr;
pub mod todo;
pub mod units;

pub use color::{Harmony, Hsl, Rgb};
pub use media::{Playlist, Repeat, Track};
pub use mood_board::{MoodBoard, Note, NoteKind, Roll};
pub use novel::{NovelForm, Pov};
pub use qr::{EcLevel, QrCode, QrError};
pub use todo::{Todo, TodoList};
pub use units::{convert, Category};
