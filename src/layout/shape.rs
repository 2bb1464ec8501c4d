//! # Shape Classification
//!
//! Maps a card's declared orientation to the footprint it takes on the
//! canvas. The rule table depends on orientation only:
//!
//! | orientation | footprint (cols x rows) |
//! |-------------|-------------------------|
//! | landscape   | 2 x 1                   |
//! | portrait    | 1 x 2                   |
//! | square      | 1 x 1                   |
//! | unknown     | 1 x 1                   |
//!
//! Image type does not weigh in. Lifestyle imagery is rendered as full-width
//! spreads outside the grid, so inside the grid a lifestyle card is shaped
//! exactly like a close-up one.

use std::num::NonZeroUsize;

use crate::model::{Footprint, Orientation, PlaceableItem};

/// Footprint for `item` on a canvas `canvas_width` columns wide.
///
/// The column span is clamped so no card is ever wider than the canvas.
pub fn classify(item: &PlaceableItem, canvas_width: NonZeroUsize) -> Footprint {
    let base = footprint_for(item.orientation);
    let width = canvas_width.get();

    if item.orientation == Orientation::Unknown {
        log::warn!(
            "item {:?} has no recognizable orientation, laying it out as square",
            item.id
        );
    }

    if base.column_span > width {
        log::debug!(
            "clamping item {:?} from {} to {} columns",
            item.id,
            base.column_span,
            width
        );
        return Footprint {
            column_span: width,
            row_span: base.row_span,
        };
    }
    base
}

/// Unclamped footprint for an orientation.
pub fn footprint_for(orientation: Orientation) -> Footprint {
    match orientation {
        Orientation::Landscape => Footprint::WIDE,
        Orientation::Portrait => Footprint::TALL,
        Orientation::Square | Orientation::Unknown => Footprint::SQUARE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageType;

    fn width(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_orientation_table() {
        let cases = [
            (Orientation::Landscape, 2, 1),
            (Orientation::Portrait, 1, 2),
            (Orientation::Square, 1, 1),
            (Orientation::Unknown, 1, 1),
        ];
        for (orientation, cols, rows) in cases {
            let fp = classify(&PlaceableItem::new("x", orientation), width(3));
            assert_eq!(fp.column_span, cols, "{}", orientation);
            assert_eq!(fp.row_span, rows, "{}", orientation);
        }
    }

    #[test]
    fn test_lifestyle_does_not_change_footprint() {
        for orientation in [
            Orientation::Landscape,
            Orientation::Portrait,
            Orientation::Square,
        ] {
            let close_up = PlaceableItem::new("a", orientation);
            let lifestyle =
                PlaceableItem::new("b", orientation).with_image_type(ImageType::Lifestyle);
            assert_eq!(
                classify(&close_up, width(3)),
                classify(&lifestyle, width(3))
            );
        }
    }

    #[test]
    fn test_landscape_clamped_on_single_column() {
        let fp = classify(&PlaceableItem::new("x", Orientation::Landscape), width(1));
        assert_eq!(fp, Footprint { column_span: 1, row_span: 1 });
    }

    #[test]
    fn test_portrait_unaffected_by_narrow_canvas() {
        let fp = classify(&PlaceableItem::new("x", Orientation::Portrait), width(1));
        assert_eq!(fp, Footprint::TALL);
    }
}
