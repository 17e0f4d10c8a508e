//! Media Player playlist
//!
//! Track order, selection and repeat/shuffle rules. The browser drives an
//! `<audio>` element from [`Playlist::current`].

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    /// Object URL or remote URL of the media
    pub src: String,
}

impl Track {
    pub fn new(title: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            src: src.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Stop after the last track
    #[default]
    Off,
    /// Wrap around to the first track
    All,
    /// Replay the current track
    One,
}

impl Repeat {
    /// Next mode in the toolbar cycle
    pub fn cycle(self) -> Self {
        match self {
            Repeat::Off => Repeat::All,
            Repeat::All => Repeat::One,
            Repeat::One => Repeat::Off,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    /// Play order as indices into `tracks`
    order: Vec<usize>,
    /// Position in `order`
    position: Option<usize>,
    pub repeat: Repeat,
    shuffled: bool,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Append a track; the first one added becomes current
    pub fn add(&mut self, track: Track) {
        self.tracks.push(track);
        self.order.push(self.tracks.len() - 1);
        if self.position.is_none() {
            self.position = Some(0);
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.position.and_then(|p| self.order.get(p).copied())
    }

    pub fn current(&self) -> Option<&Track> {
        self.current_index().and_then(|i| self.tracks.get(i))
    }

    /// Select by index into [`Playlist::tracks`]
    pub fn select(&mut self, index: usize) -> Option<&Track> {
        let position = self.order.iter().position(|&i| i == index)?;
        self.position = Some(position);
        self.current()
    }

    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        let playing = self.current_index();
        let removed = self.tracks.remove(index);

        self.order.retain(|&i| i != index);
        for i in &mut self.order {
            if *i > index {
                *i -= 1;
            }
        }

        self.position = match playing {
            _ if self.order.is_empty() => None,
            Some(p) if p == index => {
                let pos = self.position.unwrap_or(0);
                Some(pos.min(self.order.len() - 1))
            }
            Some(p) => {
                let p = if p > index { p - 1 } else { p };
                self.order.iter().position(|&i| i == p)
            }
            None => None,
        };

        Some(removed)
    }

    /// Advance after a track ends or the user presses next
    pub fn next(&mut self) -> Option<&Track> {
        let pos = self.position?;
        if self.repeat == Repeat::One {
            return self.current();
        }

        if pos + 1 < self.order.len() {
            self.position = Some(pos + 1);
        } else if self.repeat == Repeat::All {
            self.position = Some(0);
        } else {
            return None;
        }
        self.current()
    }

    pub fn previous(&mut self) -> Option<&Track> {
        let pos = self.position?;
        if self.repeat == Repeat::One {
            return self.current();
        }

        if pos > 0 {
            self.position = Some(pos - 1);
        } else if self.repeat == Repeat::All {
            self.position = Some(self.order.len() - 1);
        }
        self.current()
    }

    /// Shuffle the play order, keeping the current track first
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let current = self.current_index();
        let mut rest: Vec<usize> = (0..self.tracks.len()).filter(|&i| Some(i) != current).collect();
        rest.shuffle(rng);

        self.order = current.into_iter().chain(rest).collect();
        self.position = current.map(|_| 0);
        self.shuffled = true;
    }

    /// Restore insertion order
    pub fn unshuffle(&mut self) {
        let current = self.current_index();
        self.order = (0..self.tracks.len()).collect();
        self.position = current;
        self.shuffled = false;
    }
}

/// `m:ss` label for a playback position in seconds
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
