//! Turns a source buffer into a list of operations.
//!
//! Matches are taken greedily. When several links follow each other, the run is
//! compared against a revised plan that starts with a literal for the first byte
//! and then re-runs the match finder. The revision is kept if it is cheaper for
//! the same length, or no more expensive and longer. This is a one-step local
//! heuristic, not an optimal parse.

use alloc::vec;
use alloc::vec::Vec;

use crate::matcher::find_match;
use crate::operation::{Link, Operation};

/// Source bytes between two progress events.
const PROGRESS_INTERVAL: usize = 1024;

/// Operations committed by one call to [`step`], and where to resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub ops: Vec<Operation>,
    pub next: usize,
}

/// Decides the operations starting at `cursor`.
///
/// Emits one or two operations and returns the cursor from which the rest of
/// the source has to be re-evaluated. If `cursor` is at or past the end of
/// `source`, nothing is emitted.
#[must_use]
pub fn step(source: &[u8], cursor: usize) -> Step {
    Planner::new(source).step(cursor)
}

/// Runs [`step`] from the start of `source` to its end.
///
/// The sum of `decoded_len` over the result equals `source.len()`.
#[must_use]
pub fn plan(source: &[u8]) -> Vec<Operation> {
    let mut planner = Planner::new(source);
    let mut ops = Vec::with_capacity(source.len() / 2);
    let mut cursor = 0;
    let mut next_report = PROGRESS_INTERVAL;

    while cursor < source.len() {
        let step = planner.step(cursor);
        ops.extend(step.ops);
        cursor = step.next;

        if cursor >= next_report {
            tracing::debug!(
                cursor,
                percent = cursor * 100 / source.len(),
                "compressing bytes"
            );
            next_report = cursor + PROGRESS_INTERVAL;
        }
    }

    ops
}

/// Memoises [`find_match`] per cursor. Runs of links get re-examined after every
/// committed operation, so the same positions are queried many times.
struct Planner<'a> {
    source: &'a [u8],
    matches: Vec<Option<Option<Link>>>,
}

impl<'a> Planner<'a> {
    fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            matches: vec![None; source.len()],
        }
    }

    fn find(&mut self, cursor: usize) -> Option<Link> {
        let Some(slot) = self.matches.get_mut(cursor) else {
            return None;
        };
        *slot.get_or_insert_with(|| find_match(self.source, cursor))
    }

    fn step(&mut self, cursor: usize) -> Step {
        let Some(&byte) = self.source.get(cursor) else {
            return Step {
                ops: Vec::new(),
                next: cursor,
            };
        };

        let mut queue = Vec::new();
        let mut pos = cursor;
        while let Some(link) = self.find(pos) {
            queue.push(link);
            pos += link.length();
        }

        match queue.as_slice() {
            [] => Step {
                ops: vec![Operation::Copy(byte)],
                next: cursor + 1,
            },
            [only] => Step {
                ops: vec![Operation::Link(*only)],
                next: pos,
            },
            _ => self.reoptimize(cursor, &queue),
        }
    }

    fn reoptimize(&mut self, cursor: usize, queue: &[Link]) -> Step {
        let total_len: usize = queue.iter().map(|link| link.length()).sum();
        let total_budget: usize = queue.iter().map(|&link| Operation::from(link).cost()).sum();

        let literal = Operation::Copy(self.source[cursor]);
        let mut first_link = None;
        let mut revised_pos = cursor + 1;
        let mut revised_budget = literal.cost();

        while revised_budget < total_budget {
            let Some(link) = self.find(revised_pos) else {
                break;
            };
            first_link.get_or_insert(link);
            revised_pos += link.length();
            revised_budget += Operation::from(link).cost();
        }

        let revised_len = revised_pos - cursor;
        let better = revised_budget < total_budget && revised_len == total_len;
        let longer = revised_budget <= total_budget && revised_len > total_len;

        tracing::trace!(
            cursor,
            links = queue.len(),
            total_len,
            total_budget,
            revised_len,
            revised_budget,
            revised = better || longer,
            "link run"
        );

        match first_link {
            Some(link) if better || longer => Step {
                ops: vec![literal, Operation::Link(link)],
                next: cursor + 1 + link.length(),
            },
            _ => Step {
                ops: vec![Operation::Link(queue[0])],
                next: cursor + queue[0].length(),
            },
        }
    }
}
