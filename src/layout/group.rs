//! # Category Grouping
//!
//! Both surfaces show a moodboard as one grid per product category. Groups
//! appear in order of first appearance in the item list, and within a group
//! items keep their relative input order. The resolver runs once per group
//! on a fresh canvas.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use serde::Serialize;

use super::{resolve, row_count, PlacementRecord};
use crate::model::PlaceableItem;

/// Items sharing one category, in input order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a PlaceableItem>,
}

/// The resolved grid for one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLayout<'a> {
    pub category: &'a str,
    /// Rows the grid occupies.
    pub rows: usize,
    pub placements: Vec<PlacementRecord<'a>>,
}

/// Split `items` into per-category sublists.
pub fn group_by_category(items: &[PlaceableItem]) -> Vec<CategoryGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for item in items {
        let slot = *index.entry(item.category.as_str()).or_insert_with(|| {
            groups.push(CategoryGroup {
                category: &item.category,
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(item);
    }

    groups
}

/// Group `items` by category and resolve each group independently.
pub fn resolve_by_category(
    items: &[PlaceableItem],
    canvas_width: NonZeroUsize,
) -> Vec<CategoryLayout<'_>> {
    group_by_category(items)
        .into_iter()
        .map(|group| {
            let placements = resolve(group.items.iter().copied(), canvas_width);
            let rows = row_count(&placements);
            log::debug!(
                "category {:?}: {} items on {} rows",
                group.category,
                placements.len(),
                rows
            );
            CategoryLayout {
                category: group.category,
                rows,
                placements,
            }
        })
        .collect()
}

/// Concatenate per-category placements in display order.
pub fn flatten<'l, 'a>(layouts: &'l [CategoryLayout<'a>]) -> Vec<&'l PlacementRecord<'a>> {
    layouts.iter().flat_map(|l| l.placements.iter()).collect()
}
