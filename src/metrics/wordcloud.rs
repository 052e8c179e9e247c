//! Word-cloud sizing.

use crate::metrics::ranking::stable_desc_by;
use crate::models::OrderedCounts;
use serde::Serialize;

/// Font-size bounds, in rem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 0.8, max: 4.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSize {
    pub word: String,
    pub count: u64,
    pub size_rem: f64,
}

/// Map `count` linearly from `[min_count, max_count]` onto `range`.
///
/// A degenerate count range (all frequencies equal) maps to `range.min`.
pub fn font_size(count: u64, min_count: u64, max_count: u64, range: SizeRange) -> f64 {
    if max_count <= min_count {
        return range.min;
    }
    let clamped = count.clamp(min_count, max_count);
    let t = (clamped - min_count) as f64 / (max_count - min_count) as f64;
    range.min * (1.0 - t) + range.max * t
}

/// Size every word of the set, most frequent first.
pub fn word_cloud(words: &OrderedCounts, range: SizeRange) -> Vec<WordSize> {
    let min_count = words.values().min().unwrap_or(0);
    let max_count = words.values().max().unwrap_or(0);

    let mut sized: Vec<WordSize> = words
        .iter()
        .map(|(word, count)| WordSize {
            word: word.to_string(),
            count,
            size_rem: font_size(count, min_count, max_count, range),
        })
        .collect();

    stable_desc_by(&mut sized, |w| w.count);
    sized
}
