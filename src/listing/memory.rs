//! Memory bank dashboard
//!
//! `size` is free text on the backend ("1MB", "2.5 GB", "340 kb", "n/a").
//! Totals use whatever can be read as a number with an optional unit that
//! fits in a `u64`; anything else is counted as unknown.

use crate::models::MemoryItem;

const KB: f64 = 1024.0;

/// Parse a human size string into bytes
pub fn parse_size(raw: &str) -> Option<u64> {
    let text = raw.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);

    let value: f64 = number.parse().ok()?;
    let scale = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1.0,
        "K" | "KB" => KB,
        "M" | "MB" => KB * KB,
        "G" | "GB" => KB * KB * KB,
        _ => return None,
    };

    let bytes = (value * scale).round();
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return None;
    }
    Some(bytes as u64)
}

/// Render bytes back into the largest fitting unit
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b >= KB * KB * KB {
        format!("{:.1} GB", b / (KB * KB * KB))
    } else if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Totals shown above the memory table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total_items: usize,
    pub total_bytes: u64,
    /// Items whose size could not be read
    pub unknown_sizes: usize,
    /// `(status, count)` in first-seen order
    pub by_status: Vec<(String, usize)>,
}

impl MemoryStats {
    pub fn from_items(items: &[MemoryItem]) -> Self {
        let mut stats = MemoryStats {
            total_items: items.len(),
            ..Default::default()
        };

        for item in items {
            match parse_size(&item.size) {
                Some(bytes) => stats.total_bytes = stats.total_bytes.saturating_add(bytes),
                None => stats.unknown_sizes += 1,
            }

            match stats.by_status.iter_mut().find(|(s, _)| *s == item.status) {
                Some((_, count)) => *count += 1,
                None => stats.by_status.push((item.status.clone(), 1)),
            }
        }

        stats
    }

    pub fn count(&self, status: &str) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(status))
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

/// Items whose name, type or source contain the query
pub fn search<'a>(items: &'a [MemoryItem], query: &str) -> Vec<&'a MemoryItem> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|m| {
            query.is_empty()
                || m.name.to_lowercase().contains(&query)
                || m.kind.to_lowercase().contains(&query)
                || m.source.to_lowercase().contains(&query)
        })
        .collect()
}
