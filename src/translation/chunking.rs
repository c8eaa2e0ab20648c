/*!
 * Size-bounded batching of request texts.
 */

use std::ops::Range;

/// Default cumulative character budget of one batch
pub const DEFAULT_MAX_CHARS: usize = 18_000;

/// Default number of texts in one batch
pub const DEFAULT_MAX_ITEMS: usize = 64;

/// Limits applied to every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    /// Maximum cumulative length in characters
    pub max_chars: usize,
    /// Maximum number of texts
    pub max_items: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl ChunkLimits {
    pub fn new(max_chars: usize, max_items: usize) -> Self {
        Self {
            max_chars,
            max_items,
        }
    }
}

/// Split texts into consecutive index ranges that respect the limits.
///
/// A text longer than `max_chars` gets a batch of its own. Limits of zero are
/// treated as 1.
pub fn chunk_ranges<S: AsRef<str>>(texts: &[S], limits: &ChunkLimits) -> Vec<Range<usize>> {
    let max_chars = limits.max_chars.max(1);
    let max_items = limits.max_items.max(1);

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut total = 0;

    for (index, text) in texts.iter().enumerate() {
        let length = text.as_ref().chars().count();
        let count = index - start;
        if count > 0 && (total + length > max_chars || count >= max_items) {
            ranges.push(start..index);
            start = index;
            total = 0;
        }
        total += length;
    }

    if start < texts.len() {
        ranges.push(start..texts.len());
    }
    ranges
}

/// Split texts into consecutive batches that respect the limits.
pub fn chunk_texts<'a, S: AsRef<str>>(texts: &'a [S], limits: &ChunkLimits) -> Vec<&'a [S]> {
    chunk_ranges(texts, limits)
        .into_iter()
        .map(|range| &texts[range])
        .collect()
}
