//! # Page Break Decisions
//!
//! A category grid may only break between rows, and only at row boundaries
//! no card straddles: a portrait card spanning rows 3-4 glues those rows
//! into one unbreakable block. Blocks are then placed whole, moving to the
//! next page when they do not fit.
//!
//! Chained portrait cards can glue more rows together than a page holds.
//! Such a block is broken anyway, at the boundary cutting the fewest cards;
//! the cut cards are drawn clipped on both pages.

use std::cmp::Reverse;
use std::ops::Range;

use crate::layout::PlacementRecord;

/// What to do with a block that is about to be placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakDecision {
    /// Place it on the current page.
    Place,
    /// Start a new page and place it there.
    MoveToNextPage,
}

/// Decide whether a block of `needed` height goes on the current page.
///
/// A block that does not fit on an empty page is placed there anyway;
/// moving it would only produce an endless run of blank pages. The caller
/// splits it with [`forced_break`].
pub fn decide_break(remaining_height: f64, needed: f64, page_is_empty: bool) -> BreakDecision {
    if needed <= remaining_height || page_is_empty {
        BreakDecision::Place
    } else {
        BreakDecision::MoveToNextPage
    }
}

/// Split rows `0..row_count` into the smallest blocks that can be placed
/// independently.
pub fn row_blocks(placements: &[PlacementRecord<'_>], row_count: usize) -> Vec<Range<usize>> {
    // straddled[b] is true when some card covers both row b-1 and row b.
    let mut straddled = vec![false; row_count + 1];
    for p in placements {
        for boundary in p.row_start + 1..p.row_end() {
            if boundary < straddled.len() {
                straddled[boundary] = true;
            }
        }
    }

    let mut blocks = Vec::new();
    let mut start = 0;
    for boundary in 1..=row_count {
        if boundary == row_count || !straddled[boundary] {
            blocks.push(start..boundary);
            start = boundary;
        }
    }
    blocks
}

/// Number of cards covering both row `boundary - 1` and row `boundary`.
pub fn crossings(placements: &[PlacementRecord<'_>], boundary: usize) -> usize {
    placements
        .iter()
        .filter(|p| p.row_start < boundary && boundary < p.row_end())
        .count()
}

/// Pick a forced break for a block that does not fit on one page.
///
/// Rows `start..max_end` fit; the result is the boundary in
/// `start + 1..=max_end` cutting the fewest cards, the latest one on a tie.
pub fn forced_break(placements: &[PlacementRecord<'_>], start: usize, max_end: usize) -> usize {
    (start + 1..=max_end)
        .min_by_key(|&b| (crossings(placements, b), Reverse(b)))
        .unwrap_or(start + 1)
}
