//! # Paginated Export
//!
//! Turns a moodboard into absolute positions on fixed-size pages, ready for
//! a PDF pipeline to draw. Nothing here decides where a card sits inside its
//! category grid; that comes from the same resolver the interactive preview
//! uses, so the exported grid matches what the user saw.
//!
//! Per category, in order of first appearance:
//!
//! 1. A heading, kept on the same page as the first block of grid rows.
//! 2. The grid, broken across pages only at row boundaries no card spans.
//!    A run of glued rows taller than a page is cut where the fewest cards
//!    straddle the break; those cards appear on both pages with a clip.
//! 3. One full-width spread per lifestyle image attached to the category's
//!    close-up cards, in card order.

pub mod geometry;
pub mod page_break;

use std::ops::Range;

use serde::Serialize;

use crate::error::MoodboardError;
use crate::layout::group::{group_by_category, CategoryGroup};
use crate::layout::{resolve, row_count, PlacementRecord};
use crate::model::{Moodboard, MoodboardConfig};
use geometry::{GridGeometry, Rect};
use page_break::{crossings, decide_break, forced_break, row_blocks, BreakDecision};

/// The full export: pages in order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub pages: Vec<ExportPage>,
}

impl ExportDocument {
    /// Every element with its page index, in emission order.
    pub fn elements(&self) -> impl Iterator<Item = (usize, &ExportElement)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.elements.iter().map(move |e| (i, e)))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPage {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<ExportElement>,
}

/// A positioned element. Rects are in page coordinates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportElement {
    #[serde(rename_all = "camelCase")]
    Heading { category: String, rect: Rect },
    #[serde(rename_all = "camelCase")]
    Card {
        id: String,
        column_start: usize,
        column_span: usize,
        row_start: usize,
        row_span: usize,
        /// The whole card, which may reach past the page when cut by a
        /// forced break.
        rect: Rect,
        /// Visible part of a cut card.
        #[serde(skip_serializing_if = "Option::is_none")]
        clip: Option<Rect>,
    },
    #[serde(rename_all = "camelCase")]
    LifestyleSpread { id: String, image: String, rect: Rect },
}

impl ExportElement {
    pub fn rect(&self) -> Rect {
        match self {
            ExportElement::Heading { rect, .. }
            | ExportElement::Card { rect, .. }
            | ExportElement::LifestyleSpread { rect, .. } => *rect,
        }
    }

    /// The part of the element actually drawn on its page.
    pub fn visible_rect(&self) -> Rect {
        match self {
            ExportElement::Card {
                clip: Some(clip), ..
            } => *clip,
            other => other.rect(),
        }
    }
}

/// Lay a moodboard out onto pages.
pub fn export(moodboard: &Moodboard) -> Result<ExportDocument, MoodboardError> {
    let config = &moodboard.config;
    config.validate()?;

    let mut cursor = PageCursor::new(config);
    for group in group_by_category(&moodboard.items) {
        export_category(&mut cursor, &group, config)?;
    }

    let pages = cursor.finish();
    log::debug!(
        "exported {} items onto {} pages",
        moodboard.items.len(),
        pages.len()
    );
    Ok(ExportDocument { pages })
}

fn export_category(
    cursor: &mut PageCursor,
    group: &CategoryGroup<'_>,
    config: &MoodboardConfig,
) -> Result<(), MoodboardError> {
    let canvas_width = config.canvas_width()?;
    let geometry = GridGeometry::new(
        cursor.content_width,
        canvas_width,
        config.column_gap,
        config.row_height,
        config.row_gap,
    );

    let placements = resolve(group.items.iter().copied(), canvas_width);
    let blocks = row_blocks(&placements, row_count(&placements));

    // Heading travels with the first block of rows.
    let first_block = blocks
        .first()
        .map(|b| geometry.span_height(b.len()))
        .map(|h| if h > cursor.content_height { geometry.span_height(1) } else { h })
        .unwrap_or(0.0);
    cursor.open_section();
    if decide_break(
        cursor.remaining_height(),
        config.heading_height + first_block,
        cursor.is_empty(),
    ) == BreakDecision::MoveToNextPage
    {
        cursor.new_page();
    }
    let rect = cursor.take(config.heading_height);
    cursor.push(ExportElement::Heading {
        category: group.category.to_string(),
        rect,
    });

    for (i, block) in blocks.iter().enumerate() {
        let height = geometry.span_height(block.len());
        // The first block follows the heading directly. A block taller than
        // a page starts wherever one row still fits.
        if i > 0 {
            let needed = if height > cursor.content_height {
                geometry.span_height(1)
            } else {
                height
            };
            cursor.place_with_gap(geometry.row_gap(), needed);
        }

        if height <= cursor.remaining_height() {
            emit_rows(cursor, &geometry, &placements, block.clone());
            continue;
        }

        let mut start = block.start;
        while start < block.end {
            let fit = geometry.rows_within(cursor.remaining_height(), block.end - start);
            if fit == 0 && !cursor.is_empty() {
                cursor.new_page();
                continue;
            }
            let fit = fit.max(1);
            let end = if start + fit == block.end {
                block.end
            } else {
                let end = forced_break(&placements, start, start + fit);
                log::debug!(
                    "category {:?}: forced break before row {} cuts {} cards",
                    group.category,
                    end,
                    crossings(&placements, end)
                );
                end
            };
            emit_rows(cursor, &geometry, &placements, start..end);
            start = end;
            if start < block.end {
                cursor.new_page();
            }
        }
    }

    for item in &group.items {
        for image in item.spreads() {
            cursor.place_with_gap(geometry.row_gap(), config.spread_height);
            let rect = cursor.take(config.spread_height);
            cursor.push(ExportElement::LifestyleSpread {
                id: item.id.clone(),
                image: image.clone(),
                rect,
            });
        }
    }

    cursor.close_section(config.section_gap);
    Ok(())
}

/// Emit every card intersecting grid rows `rows` as one band at the cursor.
/// Cards reaching outside the band carry a clip to the visible part.
fn emit_rows(
    cursor: &mut PageCursor,
    geometry: &GridGeometry,
    placements: &[PlacementRecord<'_>],
    rows: Range<usize>,
) {
    let band = cursor.take(geometry.span_height(rows.len()));
    let grid_top = band.y - geometry.row_y(rows.start);

    for p in placements
        .iter()
        .filter(|p| p.row_start < rows.end && p.row_end() > rows.start)
    {
        let rect = geometry.rect(p).translate(band.x, grid_top);
        let clip = if p.row_start < rows.start || p.row_end() > rows.end {
            Some(rect.intersect(&band))
        } else {
            None
        };
        cursor.push(ExportElement::Card {
            id: p.item.id.clone(),
            column_start: p.column_start,
            column_span: p.column_span,
            row_start: p.row_start,
            row_span: p.row_span,
            rect,
            clip,
        });
    }
}

/// Tracks the page being filled and the vertical position on it.
struct PageCursor {
    width: f64,
    height: f64,
    content_x: f64,
    content_y: f64,
    content_width: f64,
    content_height: f64,
    y: f64,
    elements: Vec<ExportElement>,
    finished: Vec<ExportPage>,
    /// Vertical space owed before the next section, dropped at a page top.
    pending_gap: f64,
}

impl PageCursor {
    fn new(config: &MoodboardConfig) -> Self {
        let (width, height) = config.page.dimensions();
        let (content_width, content_height) = config.page.content_size();
        Self {
            width,
            height,
            content_x: config.page.margin.left,
            content_y: config.page.margin.top,
            content_width,
            content_height,
            y: 0.0,
            elements: Vec::new(),
            finished: Vec::new(),
            pending_gap: 0.0,
        }
    }

    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn remaining_height(&self) -> f64 {
        (self.content_height - self.y).max(0.0)
    }

    fn new_page(&mut self) {
        let elements = std::mem::take(&mut self.elements);
        self.finished.push(ExportPage {
            width: self.width,
            height: self.height,
            elements,
        });
        self.y = 0.0;
        self.pending_gap = 0.0;
    }

    /// Apply the gap owed by the previous section, unless at a page top.
    fn open_section(&mut self) {
        if !self.is_empty() {
            self.y += self.pending_gap;
        }
        self.pending_gap = 0.0;
    }

    fn close_section(&mut self, gap: f64) {
        self.pending_gap = gap;
    }

    /// Make room for a block of `height` that follows earlier content with
    /// a `gap` in between, breaking to a new page when it does not fit.
    fn place_with_gap(&mut self, gap: f64, height: f64) {
        if self.is_empty() {
            return;
        }
        match decide_break(self.remaining_height(), gap + height, false) {
            BreakDecision::Place => self.y += gap,
            BreakDecision::MoveToNextPage => self.new_page(),
        }
    }

    /// Claim a full-width strip of `height` at the current position.
    fn take(&mut self, height: f64) -> Rect {
        let rect = Rect {
            x: self.content_x,
            y: self.content_y + self.y,
            width: self.content_width,
            height,
        };
        self.y += height;
        rect
    }

    fn push(&mut self, element: ExportElement) {
        self.elements.push(element);
    }

    fn finish(mut self) -> Vec<ExportPage> {
        if !self.elements.is_empty() || self.finished.is_empty() {
            self.new_page();
        }
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edges, Orientation, PageConfig, PageSize, PlaceableItem};

    /// 300 x 400 content area, 3 columns of 100pt, 100pt rows, no gaps.
    fn config() -> MoodboardConfig {
        MoodboardConfig {
            columns: 3,
            column_gap: 0.0,
            row_gap: 0.0,
            row_height: 100.0,
            heading_height: 20.0,
            spread_height: 150.0,
            section_gap: 10.0,
            page: PageConfig {
                size: PageSize::Custom {
                    width: 320.0,
                    height: 420.0,
                },
                margin: Edges::uniform(10.0),
                landscape: false,
            },
        }
    }

    fn moodboard(items: Vec<PlaceableItem>) -> Moodboard {
        Moodboard {
            items,
            config: config(),
        }
    }

    fn squares(category: &str, n: usize) -> Vec<PlaceableItem> {
        (0..n)
            .map(|i| {
                PlaceableItem::new(format!("{}-{}", category, i), Orientation::Square)
                    .with_category(category)
            })
            .collect()
    }

    fn card_rects(doc: &ExportDocument) -> Vec<(usize, String, Rect)> {
        doc.elements()
            .filter_map(|(page, e)| match e {
                ExportElement::Card { id, rect, .. } => Some((page, id.clone(), *rect)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_moodboard_has_one_blank_page() {
        let doc = export(&moodboard(vec![])).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].elements.is_empty());
        assert_eq!(doc.pages[0].width, 320.0);
    }

    #[test]
    fn test_cards_positioned_below_heading() {
        let doc = export(&moodboard(squares("Tiles", 4))).unwrap();
        assert_eq!(doc.pages.len(), 1);

        match &doc.pages[0].elements[0] {
            ExportElement::Heading { category, rect } => {
                assert_eq!(category, "Tiles");
                assert_eq!((rect.x, rect.y, rect.height), (10.0, 10.0, 20.0));
            }
            other => panic!("expected heading, got {:?}", other),
        }

        let cards = card_rects(&doc);
        assert_eq!(cards.len(), 4);
        assert_eq!((cards[0].2.x, cards[0].2.y), (10.0, 30.0));
        assert_eq!((cards[2].2.x, cards[2].2.y), (210.0, 30.0));
        assert_eq!((cards[3].2.x, cards[3].2.y), (10.0, 130.0));
    }

    #[test]
    fn test_grid_breaks_between_rows() {
        // 12 squares = 4 rows of 100pt; only 3 fit under the heading.
        let doc = export(&moodboard(squares("Tiles", 12))).unwrap();
        assert_eq!(doc.pages.len(), 2);

        let cards = card_rects(&doc);
        let on_second: Vec<&(usize, String, Rect)> =
            cards.iter().filter(|(page, _, _)| *page == 1).collect();
        assert_eq!(on_second.len(), 3);
        // Continued rows start at the top of the content area.
        assert!(on_second.iter().all(|(_, _, r)| r.y == 10.0));
    }

    #[test]
    fn test_portrait_never_split_across_pages() {
        let mut items = squares("Tiles", 6);
        // Rows 0-1 full of squares, then a portrait at (0, 2) spanning
        // rows 2-3, which would straddle the page end.
        items.push(PlaceableItem::new("tall", Orientation::Portrait).with_category("Tiles"));
        let doc = export(&moodboard(items)).unwrap();

        let cards = card_rects(&doc);
        let tall = cards.iter().find(|(_, id, _)| id == "tall").unwrap();
        assert_eq!(tall.0, 1);
        assert_eq!(tall.2.y, 10.0);
        assert_eq!(tall.2.height, 200.0);
    }

    #[test]
    fn test_chained_portraits_split_where_fewest_cards_cross() {
        use Orientation::*;
        // Every boundary of the seven rows is straddled by one portrait,
        // so the grid is one 700pt block on a 400pt page.
        let orientations = [
            Portrait, Square, Square, Square, Portrait, Portrait, Square, Portrait, Square,
            Portrait, Square, Portrait, Square,
        ];
        let items: Vec<PlaceableItem> = orientations
            .iter()
            .enumerate()
            .map(|(i, &o)| PlaceableItem::new(i.to_string(), o).with_category("Tiles"))
            .collect();
        let doc = export(&moodboard(items)).unwrap();
        assert_eq!(doc.pages.len(), 2);

        let cut: Vec<(usize, Rect, Option<Rect>)> = doc
            .elements()
            .filter_map(|(page, e)| match e {
                ExportElement::Card { id, rect, clip, .. } if id == "5" => {
                    Some((page, *rect, *clip))
                }
                _ => None,
            })
            .collect();
        assert_eq!(cut.len(), 2);

        // Rows 0..3 under the heading; card 5 spans rows 2-3.
        let (page, rect, clip) = cut[0];
        assert_eq!(page, 0);
        assert_eq!((rect.y, rect.height), (230.0, 200.0));
        let clip = clip.unwrap();
        assert_eq!((clip.y, clip.height), (230.0, 100.0));

        // Rows 3..7 continue at the top of the next page.
        let (page, rect, clip) = cut[1];
        assert_eq!(page, 1);
        assert_eq!(rect.y, -90.0);
        let clip = clip.unwrap();
        assert_eq!((clip.y, clip.height), (10.0, 100.0));

        for (_, e) in doc.elements() {
            let visible = e.visible_rect();
            assert!(visible.y >= 10.0 && visible.bottom() <= 410.0, "{:?}", e);
        }
        let uncut = doc.elements().find_map(|(_, e)| match e {
            ExportElement::Card { id, clip, .. } if id == "1" => Some(*clip),
            _ => None,
        });
        assert_eq!(uncut, Some(None));
    }

    #[test]
    fn test_heading_moves_with_first_row() {
        let mut items = squares("A", 9);
        items.extend(squares("B", 1));
        let doc = export(&moodboard(items)).unwrap();

        // A fills 20 + 300 of 400pt; B's heading plus a row does not fit.
        assert_eq!(doc.pages.len(), 2);
        assert!(matches!(
            &doc.pages[1].elements[0],
            ExportElement::Heading { category, rect } if category == "B" && rect.y == 10.0
        ));
    }

    #[test]
    fn test_lifestyle_spreads_follow_grid() {
        let items = vec![
            PlaceableItem::new("sofa", Orientation::Landscape)
                .with_category("Seating")
                .with_lifestyle_images(vec!["living.jpg".into(), "den.jpg".into()]),
            PlaceableItem::new("chair", Orientation::Square).with_category("Seating"),
        ];
        let doc = export(&moodboard(items)).unwrap();

        let kinds: Vec<(usize, &str)> = doc
            .elements()
            .map(|(page, e)| {
                let kind = match e {
                    ExportElement::Heading { .. } => "heading",
                    ExportElement::Card { .. } => "card",
                    ExportElement::LifestyleSpread { .. } => "spread",
                };
                (page, kind)
            })
            .collect();
        // 20 heading + 100 row + 150 spread fit; the second spread does not.
        assert_eq!(
            kinds,
            vec![
                (0, "heading"),
                (0, "card"),
                (0, "card"),
                (0, "spread"),
                (1, "spread"),
            ]
        );

        let spread = doc.pages[0].elements[3].rect();
        assert_eq!((spread.x, spread.y, spread.width), (10.0, 130.0, 300.0));
    }

    #[test]
    fn test_section_gap_between_categories() {
        let mut items = squares("A", 1);
        items.extend(squares("B", 1));
        let doc = export(&moodboard(items)).unwrap();
        let headings: Vec<Rect> = doc
            .elements()
            .filter(|(_, e)| matches!(e, ExportElement::Heading { .. }))
            .map(|(_, e)| e.rect())
            .collect();
        // A: heading 10..30, row 30..130, gap 10 -> B heading at 140.
        assert_eq!(headings[1].y, 140.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut board = moodboard(squares("A", 1));
        board.config.row_height = 0.0;
        assert!(matches!(
            export(&board),
            Err(MoodboardError::InvalidConfig(_))
        ));
    }
}
