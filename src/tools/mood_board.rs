//! Mood Board
//!
//! Free-form notes on a canvas, persisted to local storage after every
//! mutation. Random placement is drawn by the caller as a [`Roll`] so tests
//! can pin it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::store::{load_json, save_json, KeyValueStore, Result};

/// Storage key of the board
pub const BOARD_KEY: &str = "orion-moodboard";

pub const NOTE_COLORS: [&str; 6] = [
    "#fef3c7", "#fce7f3", "#dbeafe", "#d1fae5", "#f3e8ff", "#fed7aa",
];

pub const IMAGE_NOTE_COLOR: &str = "#ffffff";
pub const TEXT_PLACEHOLDER: &str = "Double-click to edit...";

pub const NOTE_WIDTH: f64 = 200.0;
pub const TEXT_NOTE_HEIGHT: f64 = 120.0;
pub const IMAGE_NOTE_HEIGHT: f64 = 200.0;

/// New notes land somewhere in `[SPAWN_MIN, SPAWN_MIN + SPAWN_RANGE)`
const SPAWN_MIN: f64 = 50.0;
const SPAWN_RANGE: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    /// Text, or an image data URL
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

/// Three uniform samples in `[0, 1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roll {
    pub x: f64,
    pub y: f64,
    pub color: f64,
}

impl Roll {
    /// Draw placement and color from `rng`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Roll {
            x: rng.gen_range(0.0..1.0),
            y: rng.gen_range(0.0..1.0),
            color: rng.gen_range(0.0..1.0),
        }
    }

    fn position(&self) -> (f64, f64) {
        (
            SPAWN_MIN + self.x.clamp(0.0, 0.999_999) * SPAWN_RANGE,
            SPAWN_MIN + self.y.clamp(0.0, 0.999_999) * SPAWN_RANGE,
        )
    }

    fn color(&self) -> &'static str {
        let idx = (self.color.clamp(0.0, 0.999_999) * NOTE_COLORS.len() as f64) as usize;
        NOTE_COLORS[idx.min(NOTE_COLORS.len() - 1)]
    }
}

/// Keep a dragged note inside the board
pub fn clamp_position(x: f64, y: f64, board_width: f64, board_height: f64) -> (f64, f64) {
    (
        x.min(board_width - NOTE_WIDTH).max(0.0),
        y.min(board_height - TEXT_NOTE_HEIGHT).max(0.0),
    )
}

#[derive(Debug)]
pub struct MoodBoard<S: KeyValueStore> {
    store: S,
    notes: Vec<Note>,
}

impl<S: KeyValueStore> MoodBoard<S> {
    pub fn load(store: S) -> Self {
        let notes = load_json(&store, BOARD_KEY).unwrap_or_default();
        Self { store, notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    fn persist(&self) -> Result<()> {
        save_json(&self.store, BOARD_KEY, &self.notes)
    }

    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let last = self.notes.iter().map(|n| n.id).max().unwrap_or(0);
        now.max(last + 1)
    }

    fn push(&mut self, note: Note) -> Result<i64> {
        let id = note.id;
        self.notes.push(note);
        self.persist()?;
        Ok(id)
    }

    pub fn add_text(&mut self, roll: Roll) -> Result<i64> {
        let (x, y) = roll.position();
        let note = Note {
            id: self.next_id(),
            kind: NoteKind::Text,
            content: TEXT_PLACEHOLDER.to_string(),
            x,
            y,
            width: NOTE_WIDTH,
            height: TEXT_NOTE_HEIGHT,
            color: roll.color().to_string(),
        };
        self.push(note)
    }

    pub fn add_image(&mut self, data_url: &str, roll: Roll) -> Result<i64> {
        let (x, y) = roll.position();
        let note = Note {
            id: self.next_id(),
            kind: NoteKind::Image,
            content: data_url.to_string(),
            x,
            y,
            width: NOTE_WIDTH,
            height: IMAGE_NOTE_HEIGHT,
            color: IMAGE_NOTE_COLOR.to_string(),
        };
        self.push(note)
    }

    pub fn set_content(&mut self, id: i64, content: &str) -> Result<bool> {
        self.update(id, |n| n.content = content.to_string())
    }

    pub fn set_color(&mut self, id: i64, color: &str) -> Result<bool> {
        self.update(id, |n| n.color = color.to_string())
    }

    /// Move a note, clamped to the board bounds
    pub fn move_to(&mut self, id: i64, x: f64, y: f64, board: (f64, f64)) -> Result<bool> {
        let (x, y) = clamp_position(x, y, board.0, board.1);
        self.update(id, |n| {
            n.x = x;
            n.y = y;
        })
    }

    fn update(&mut self, id: i64, f: impl FnOnce(&mut Note)) -> Result<bool> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        f(note);
        self.persist()?;
        Ok(true)
    }

    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if before == self.notes.len() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Remove every note; callers confirm with the user first
    pub fn clear(&mut self) -> Result<()> {
        self.notes.clear();
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ROLL: Roll = Roll {
        x: 0.5,
        y: 0.0,
        color: 0.99,
    };

    #[test]
    fn test_text_note_defaults() {
        let mut board = MoodBoard::load(MemoryStore::new());
        let id = board.add_text(ROLL).unwrap();
        let note = board.get(id).unwrap();

        assert_eq!(note.kind, NoteKind::Text);
        assert_eq!(note.content, TEXT_PLACEHOLDER);
        assert_eq!((note.width, note.height), (200.0, 120.0));
        assert_eq!((note.x, note.y), (150.0, 50.0));
        assert_eq!(note.color, "#fed7aa");
    }

    #[test]
    fn test_image_note_is_white_and_square() {
        let mut board = MoodBoard::load(MemoryStore::new());
        let id = board.add_image("data:image/png;base64,AAAA", ROLL).unwrap();
        let note = board.get(id).unwrap();
        assert_eq!(note.color, IMAGE_NOTE_COLOR);
        assert_eq!(note.height, 200.0);
    }

    #[test]
    fn test_move_is_clamped() {
        let mut board = MoodBoard::load(MemoryStore::new());
        let id = board.add_text(ROLL).unwrap();

        board.move_to(id, 900.0, -40.0, (800.0, 600.0)).unwrap();
        let note = board.get(id).unwrap();
        assert_eq!((note.x, note.y), (600.0, 0.0));

        assert_eq!(clamp_position(10.0, 700.0, 800.0, 600.0), (10.0, 480.0));
    }

    #[test]
    fn test_board_survives_remount() {
        let store = MemoryStore::new();
        let mut board = MoodBoard::load(store.clone());
        let id = board.add_text(ROLL).unwrap();
        board.set_content(id, "Palette ideas").unwrap();
        board.add_text(Roll::random(&mut StdRng::seed_from_u64(7))).unwrap();

        let remounted = MoodBoard::load(store.clone());
        assert_eq!(remounted.notes(), board.notes());

        board.clear().unwrap();
        assert!(MoodBoard::load(store).notes().is_empty());
    }

    #[test]
    fn test_random_roll_lands_in_spawn_area() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let roll = Roll::random(&mut rng);
            for v in [roll.x, roll.y, roll.color] {
                assert!((0.0..1.0).contains(&v));
            }
            let (x, y) = roll.position();
            assert!((SPAWN_MIN..SPAWN_MIN + SPAWN_RANGE).contains(&x));
            assert!((SPAWN_MIN..SPAWN_MIN + SPAWN_RANGE).contains(&y));
            assert!(NOTE_COLORS.contains(&roll.color()));
        }
    }

    #[test]
    fn test_same_seed_same_roll() {
        let a = Roll::random(&mut StdRng::seed_from_u64(3));
        let b = Roll::random(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
