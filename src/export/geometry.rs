//! # Grid Geometry
//!
//! Maps abstract placement cells onto points. Columns are equal `1fr`
//! tracks that share the content width after gaps; rows have a fixed
//! height. A card spanning several tracks also covers the gaps between them.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::layout::PlacementRecord;

/// An axis-aligned rectangle in points, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn translate(self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The overlapping part of two rectangles (zero-sized if disjoint).
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Rect {
            x,
            y,
            width: (self.right().min(other.right()) - x).max(0.0),
            height: (self.bottom().min(other.bottom()) - y).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    column_width: f64,
    column_gap: f64,
    row_height: f64,
    row_gap: f64,
}

impl GridGeometry {
    pub fn new(
        content_width: f64,
        columns: NonZeroUsize,
        column_gap: f64,
        row_height: f64,
        row_gap: f64,
    ) -> Self {
        let columns = columns.get();
        let total_gap = column_gap * (columns - 1) as f64;
        let column_width = ((content_width - total_gap).max(0.0)) / columns as f64;
        Self {
            column_width,
            column_gap,
            row_height,
            row_gap,
        }
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn row_gap(&self) -> f64 {
        self.row_gap
    }

    /// X offset of a column from the grid's left edge.
    pub fn column_x(&self, col: usize) -> f64 {
        col as f64 * (self.column_width + self.column_gap)
    }

    /// Width covered by `span` columns, including the gaps between them.
    pub fn span_width(&self, span: usize) -> f64 {
        if span == 0 {
            return 0.0;
        }
        span as f64 * self.column_width + (span - 1) as f64 * self.column_gap
    }

    /// Y offset of a row from the grid's top edge.
    pub fn row_y(&self, row: usize) -> f64 {
        row as f64 * (self.row_height + self.row_gap)
    }

    /// Height covered by `span` rows, including the gaps between them.
    pub fn span_height(&self, span: usize) -> f64 {
        if span == 0 {
            return 0.0;
        }
        span as f64 * self.row_height + (span - 1) as f64 * self.row_gap
    }

    /// How many whole rows (at most `max`) fit into `height`.
    pub fn rows_within(&self, height: f64, max: usize) -> usize {
        (1..=max)
            .take_while(|&n| self.span_height(n) <= height + 1e-6)
            .last()
            .unwrap_or(0)
    }

    /// Rectangle of a placement relative to the grid's top-left corner.
    pub fn rect(&self, placement: &PlacementRecord<'_>) -> Rect {
        Rect {
            x: self.column_x(placement.column_start),
            y: self.row_y(placement.row_start),
            width: self.span_width(placement.column_span),
            height: self.span_height(placement.row_span),
        }
    }
}
