//! # Placement Resolver
//!
//! Assigns every moodboard card a rectangle on a fixed-width, growable-height
//! column grid. Both rendering surfaces (the interactive preview and the
//! paginated export) consume these records, so the algorithm is the single
//! source of truth for where a card goes.
//!
//! ## Algorithm
//!
//! Greedy dense scanline placement:
//!
//! 1. Start from a fresh, empty occupancy canvas.
//! 2. For each card, in input order, take its footprint from the shape
//!    classifier.
//! 3. Scan candidate cells row-major from (row 0, col 0). The first cell
//!    where the footprint fits wins, so earlier gaps are filled before new
//!    rows are opened.
//! 4. Commit the rectangle and emit a record.
//!
//! The scan always ends: every row at or past the canvas height is empty,
//! and the classifier never returns a footprint wider than the canvas, so
//! column 0 of the first unallocated row always fits.
//!
//! Output order is input order, not discovery order. Ties go to the
//! lexicographically smallest (row, col), which makes the result a pure
//! function of the card sequence and the column count.

pub mod canvas;
pub mod group;
pub mod shape;

use std::num::NonZeroUsize;

use serde::{Serialize, Serializer};

use crate::model::{Footprint, PlaceableItem};
use canvas::OccupancyCanvas;

/// Where one card landed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord<'a> {
    /// The placed card. Serialized as its id.
    #[serde(rename = "id", serialize_with = "serialize_item_id")]
    pub item: &'a PlaceableItem,
    /// Column start (0-based).
    pub column_start: usize,
    pub column_span: usize,
    /// Row start (0-based).
    pub row_start: usize,
    pub row_span: usize,
}

fn serialize_item_id<S: Serializer>(item: &&PlaceableItem, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&item.id)
}

impl PlacementRecord<'_> {
    /// Column end (exclusive).
    pub fn column_end(&self) -> usize {
        self.column_start + self.column_span
    }

    /// Row end (exclusive).
    pub fn row_end(&self) -> usize {
        self.row_start + self.row_span
    }

    /// Whether two records share at least one cell.
    pub fn overlaps(&self, other: &PlacementRecord<'_>) -> bool {
        self.column_start < other.column_end()
            && other.column_start < self.column_end()
            && self.row_start < other.row_end()
            && other.row_start < self.row_end()
    }
}

/// Place `items` on a canvas `canvas_width` columns wide.
///
/// Returns one record per item, in the order the items were supplied.
pub fn resolve<'a, I>(items: I, canvas_width: NonZeroUsize) -> Vec<PlacementRecord<'a>>
where
    I: IntoIterator<Item = &'a PlaceableItem>,
{
    let mut canvas = OccupancyCanvas::new(canvas_width);
    let items = items.into_iter();
    let mut result = Vec::with_capacity(items.size_hint().0);

    for item in items {
        let footprint = shape::classify(item, canvas_width);
        let (col, row) = find_slot(&canvas, footprint);
        canvas.commit(col, row, footprint);

        log::debug!(
            "placed {:?} ({}) at col {} row {} span {}x{}",
            item.id,
            item.orientation,
            col,
            row,
            footprint.column_span,
            footprint.row_span
        );

        result.push(PlacementRecord {
            item,
            column_start: col,
            column_span: footprint.column_span,
            row_start: row,
            row_span: footprint.row_span,
        });
    }

    result
}

/// First (col, row) in row-major order where `footprint` fits.
fn find_slot(canvas: &OccupancyCanvas, footprint: Footprint) -> (usize, usize) {
    let last_col = canvas.width().saturating_sub(footprint.column_span);
    // Row `canvas.height()` is empty, so the search below always succeeds
    // there at the latest.
    (0..=canvas.height())
        .find_map(|row| {
            (0..=last_col)
                .find(|&col| canvas.is_free(col, row, footprint))
                .map(|col| (col, row))
        })
        .unwrap_or((0, canvas.height()))
}

/// Number of rows a set of placements occupies.
pub fn row_count(placements: &[PlacementRecord<'_>]) -> usize {
    placements.iter().map(|p| p.row_end()).max().unwrap_or(0)
}
