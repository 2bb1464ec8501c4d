//! # Moodboard
//!
//! Deterministic layout for product moodboards.
//!
//! A moodboard is shown twice: as an interactive on-screen preview and as a
//! paginated export document. Both must agree on where every card sits, so
//! neither surface packs cards on its own. They both call the resolver in
//! this crate, which is a pure function of the card list and the column
//! count.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]           — Cards, shape attributes, shared config
//!       ↓
//!   [layout::group]   — One sublist per category
//!       ↓
//!   [layout]          — Shape classifier + occupancy canvas + resolver
//!       ↓                            ↓
//!   preview (grid cells)        [export] — Points on pages
//! ```

pub mod error;
pub mod export;
pub mod layout;
pub mod model;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::MoodboardError;

use export::ExportDocument;
use layout::group::{resolve_by_category, CategoryLayout};
use model::Moodboard;

/// Resolve every category grid of a moodboard.
pub fn layout_moodboard(moodboard: &Moodboard) -> Result<Vec<CategoryLayout<'_>>, MoodboardError> {
    let canvas_width = moodboard.config.canvas_width()?;
    Ok(resolve_by_category(&moodboard.items, canvas_width))
}

/// Resolve a moodboard described as JSON; returns the per-category
/// placements as JSON, with cards referenced by id.
pub fn layout_json(json: &str) -> Result<String, MoodboardError> {
    let moodboard: Moodboard = serde_json::from_str(json)?;
    let layouts = layout_moodboard(&moodboard)?;
    Ok(serde_json::to_string_pretty(&layouts)?)
}

/// Lay a moodboard out onto export pages.
pub fn export_moodboard(moodboard: &Moodboard) -> Result<ExportDocument, MoodboardError> {
    export::export(moodboard)
}

/// Export a moodboard described as JSON; returns page positions as JSON.
pub fn export_json(json: &str) -> Result<String, MoodboardError> {
    let moodboard: Moodboard = serde_json::from_str(json)?;
    let document = export_moodboard(&moodboard)?;
    Ok(serde_json::to_string_pretty(&document)?)
}
