//! # Occupancy Canvas
//!
//! A fixed-width, growable-height grid of occupied cells. Rows past the
//! allocated height are implicitly empty; `commit` grows the grid one row at
//! a time as placements extend downward. Cells are never cleared, and a
//! canvas lives for exactly one resolver call.

use std::num::NonZeroUsize;

use crate::model::Footprint;

#[derive(Debug, Clone)]
pub struct OccupancyCanvas {
    width: usize,
    rows: Vec<Vec<bool>>,
}

impl OccupancyCanvas {
    pub fn new(width: NonZeroUsize) -> Self {
        Self {
            width: width.get(),
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of allocated rows. Every row at or past this index is empty.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cell at (`col`, `row`) has been committed.
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// True iff the rectangle starting at (`col`, `row`) lies within the
    /// canvas width and none of its cells is occupied.
    pub fn is_free(&self, col: usize, row: usize, footprint: Footprint) -> bool {
        if footprint.column_span == 0 || col + footprint.column_span > self.width {
            return false;
        }
        // Allocated rows only; anything below is empty.
        self.rows
            .iter()
            .skip(row)
            .take(footprint.row_span)
            .all(|cells| !cells[col..col + footprint.column_span].iter().any(|&c| c))
    }

    /// Mark every cell of the rectangle occupied, growing rows as needed.
    ///
    /// The caller must have checked `is_free` first; committing over an
    /// occupied cell is a resolver bug.
    pub fn commit(&mut self, col: usize, row: usize, footprint: Footprint) {
        debug_assert!(
            self.is_free(col, row, footprint),
            "commit over occupied or out-of-bounds cells at ({}, {})",
            col,
            row
        );

        let row_end = row + footprint.row_span;
        while self.rows.len() < row_end {
            log::trace!("canvas grows to {} rows", self.rows.len() + 1);
            self.rows.push(vec![false; self.width]);
        }

        let col_end = (col + footprint.column_span).min(self.width);
        for cells in &mut self.rows[row..row_end] {
            for cell in &mut cells[col..col_end] {
                *cell = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: usize) -> OccupancyCanvas {
        OccupancyCanvas::new(NonZeroUsize::new(width).unwrap())
    }

    #[test]
    fn test_empty_canvas_is_free_everywhere_in_bounds() {
        let c = canvas(3);
        assert_eq!(c.height(), 0);
        assert!(c.is_free(0, 0, Footprint::SQUARE));
        assert!(c.is_free(1, 10, Footprint::WIDE));
        assert!(c.is_free(2, 5, Footprint::TALL));
    }

    #[test]
    fn test_out_of_bounds_is_never_free() {
        let c = canvas(3);
        assert!(!c.is_free(2, 0, Footprint::WIDE));
        assert!(!c.is_free(3, 0, Footprint::SQUARE));
    }

    #[test]
    fn test_commit_grows_and_blocks() {
        let mut c = canvas(3);
        c.commit(0, 0, Footprint::TALL);
        assert_eq!(c.height(), 2);
        assert!(c.is_occupied(0, 0));
        assert!(c.is_occupied(0, 1));
        assert!(!c.is_occupied(1, 0));

        assert!(!c.is_free(0, 0, Footprint::SQUARE));
        assert!(!c.is_free(0, 1, Footprint::WIDE));
        assert!(c.is_free(1, 1, Footprint::WIDE));
        assert!(c.is_free(0, 2, Footprint::SQUARE));
    }

    #[test]
    fn test_partial_overlap_with_allocated_rows() {
        let mut c = canvas(2);
        c.commit(1, 0, Footprint::SQUARE);
        // Tall card at column 1 starting at row 0 hits the committed cell,
        // starting at row 1 it only touches unallocated rows.
        assert!(!c.is_free(1, 0, Footprint::TALL));
        assert!(c.is_free(1, 1, Footprint::TALL));
    }

    #[test]
    fn test_commit_past_height_leaves_gap_rows_empty() {
        let mut c = canvas(3);
        c.commit(2, 3, Footprint::SQUARE);
        assert_eq!(c.height(), 4);
        assert!(c.is_occupied(2, 3));
        assert!((0..3).all(|row| (0..3).all(|col| !c.is_occupied(col, row))));
        assert!(c.is_free(0, 0, Footprint::WIDE));
    }
}
