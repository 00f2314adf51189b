use crate::format::{MAX_LINK_LENGTH, MAX_OFFSET, MIN_LINK_LENGTH};
use crate::operation::Link;

/// Finds the longest back-reference for the bytes starting at `cursor`.
///
/// Every window start in `[cursor - MAX_OFFSET, cursor)` is tried in ascending
/// order. The window pointer wraps back to its start when it reaches `cursor`, so
/// a short pattern can describe a run extending past the bytes already written.
/// Only a strictly longer match replaces the current best, so among equally long
/// matches the one with the largest distance wins.
///
/// Returns `None` if fewer than `MIN_LINK_LENGTH` bytes remain or no match of at
/// least that length exists.
#[must_use]
pub fn find_match(source: &[u8], cursor: usize) -> Option<Link> {
    let remaining = source.len().checked_sub(cursor)?;
    if remaining < MIN_LINK_LENGTH {
        return None;
    }

    let max_len = remaining.min(MAX_LINK_LENGTH);
    let window_min = cursor.saturating_sub(MAX_OFFSET);
    let target = &source[cursor..cursor + max_len];

    let mut best_len = 0;
    let mut best_start = 0;

    for start in window_min..cursor {
        let len = wrapped_match_len(source, start, cursor, target);
        if len > best_len {
            best_len = len;
            best_start = start;
            // Nothing later can be strictly longer.
            if best_len == max_len {
                break;
            }
        }
    }

    if best_len < MIN_LINK_LENGTH {
        return None;
    }

    Link::new(best_len, cursor - best_start)
}

/// Length of the common prefix of `target` and the window `source[start..cursor]`
/// repeated indefinitely.
#[inline]
fn wrapped_match_len(source: &[u8], start: usize, cursor: usize, target: &[u8]) -> usize {
    let mut pos = start;
    let mut len = 0;

    while len < target.len() {
        if pos >= cursor {
            pos = start;
        }
        if source[pos] != target[len] {
            break;
        }
        pos += 1;
        len += 1;
    }

    len
}
