//! # Moodboard Model
//!
//! The input representation for the layout resolver. A moodboard is a flat
//! list of product cards plus the configuration both rendering surfaces
//! share. Cards carry declared shape attributes (orientation, image type)
//! and a grouping key (category); everything else a card carries is opaque
//! payload that layout never looks at.
//!
//! Shape attributes are closed enumerations with an explicit fallback arm.
//! Deserialization never fails on an unrecognized or missing value: it lands
//! on `Unknown`, and the shape classifier treats `Unknown` like `Square`.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MoodboardError;

/// A complete moodboard ready for layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moodboard {
    /// Product cards in curation order. The order is the draw order and the
    /// tie-break for every layout decision.
    #[serde(default)]
    pub items: Vec<PlaceableItem>,

    /// Grid and page configuration. Both the preview and the export must
    /// use the same `columns` value.
    #[serde(default)]
    pub config: MoodboardConfig,
}

/// One product card on the moodboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceableItem {
    /// Opaque identity, unique within one moodboard.
    pub id: String,

    /// Declared orientation of the primary image.
    #[serde(default)]
    pub orientation: Orientation,

    /// Whether the primary image is a close-up or a lifestyle shot.
    #[serde(default)]
    pub image_type: ImageType,

    /// Grouping key (product type). Items without one share the empty group.
    #[serde(default)]
    pub category: String,

    /// Lifestyle imagery rendered as full-width spreads after the category
    /// grid. Only honored for close-up items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lifestyle_images: Vec<String>,

    /// Display-only fields (name, brand, finish, tags, links...).
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl PlaceableItem {
    /// A bare card with no payload, mostly useful for callers building
    /// moodboards in code.
    pub fn new(id: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            orientation,
            image_type: ImageType::CloseUp,
            category: String::new(),
            lifestyle_images: Vec::new(),
            payload: serde_json::Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image_type(mut self, image_type: ImageType) -> Self {
        self.image_type = image_type;
        self
    }

    pub fn with_lifestyle_images(mut self, images: Vec<String>) -> Self {
        self.lifestyle_images = images;
        self
    }

    /// Lifestyle spreads that belong after this card's category grid.
    /// Lifestyle-typed cards never contribute spreads.
    pub fn spreads(&self) -> &[String] {
        match self.image_type {
            ImageType::Lifestyle => &[],
            ImageType::CloseUp | ImageType::Unknown => &self.lifestyle_images,
        }
    }
}

/// Declared orientation of a card's primary image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
    /// Missing or unrecognized. Laid out like `Square`.
    #[default]
    Unknown,
}

impl Orientation {
    /// Lenient parse: case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Orientation::Portrait,
            "landscape" => Orientation::Landscape,
            "square" => Orientation::Square,
            _ => Orientation::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Square => "square",
            Orientation::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the primary image shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageType {
    CloseUp,
    Lifestyle,
    /// Missing or unrecognized. Treated like `CloseUp`.
    #[default]
    Unknown,
}

impl ImageType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "close-up" | "closeup" | "close_up" => ImageType::CloseUp,
            "lifestyle" => ImageType::Lifestyle,
            _ => ImageType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::CloseUp => "close-up",
            ImageType::Lifestyle => "lifestyle",
            ImageType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Shape attributes accept any JSON value. Strings are parsed leniently,
// everything else (null, numbers, objects) becomes `Unknown`.

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => Orientation::parse(&s),
            _ => Orientation::Unknown,
        })
    }
}

impl Serialize for Orientation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ImageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => ImageType::parse(&s),
            _ => ImageType::Unknown,
        })
    }
}

impl Serialize for ImageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Cells a placed card occupies on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footprint {
    pub column_span: usize,
    pub row_span: usize,
}

impl Footprint {
    pub const SQUARE: Footprint = Footprint {
        column_span: 1,
        row_span: 1,
    };
    pub const WIDE: Footprint = Footprint {
        column_span: 2,
        row_span: 1,
    };
    pub const TALL: Footprint = Footprint {
        column_span: 1,
        row_span: 2,
    };
}

// ── Configuration ───────────────────────────────────────────────

/// Column count used when a moodboard does not say otherwise.
pub const DEFAULT_COLUMNS: usize = 3;

/// Grid and page configuration shared by the preview and the export.
///
/// All lengths are in points (1/72 inch). Only `columns` matters to the
/// placement resolver; the rest drives the export geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodboardConfig {
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_gap")]
    pub column_gap: f64,
    #[serde(default = "default_gap")]
    pub row_gap: f64,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    #[serde(default = "default_heading_height")]
    pub heading_height: f64,
    #[serde(default = "default_spread_height")]
    pub spread_height: f64,
    #[serde(default = "default_section_gap")]
    pub section_gap: f64,
    #[serde(default)]
    pub page: PageConfig,
}

fn default_columns() -> usize {
    DEFAULT_COLUMNS
}

fn default_gap() -> f64 {
    12.0
}

fn default_row_height() -> f64 {
    160.0
}

fn default_heading_height() -> f64 {
    28.0
}

fn default_spread_height() -> f64 {
    360.0
}

fn default_section_gap() -> f64 {
    24.0
}

impl Default for MoodboardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            column_gap: default_gap(),
            row_gap: default_gap(),
            row_height: default_row_height(),
            heading_height: default_heading_height(),
            spread_height: default_spread_height(),
            section_gap: default_section_gap(),
            page: PageConfig::default(),
        }
    }
}

impl MoodboardConfig {
    /// The canvas width for the placement resolver.
    pub fn canvas_width(&self) -> Result<NonZeroUsize, MoodboardError> {
        NonZeroUsize::new(self.columns).ok_or_else(|| {
            MoodboardError::InvalidConfig("columns must be at least 1".to_string())
        })
    }

    /// Check every value the export geometry relies on.
    pub fn validate(&self) -> Result<(), MoodboardError> {
        self.canvas_width()?;

        let positive = [
            ("rowHeight", self.row_height),
            ("spreadHeight", self.spread_height),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(MoodboardError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("columnGap", self.column_gap),
            ("rowGap", self.row_gap),
            ("headingHeight", self.heading_height),
            ("sectionGap", self.section_gap),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(MoodboardError::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        let (width, height) = self.page.content_size();
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            return Err(MoodboardError::InvalidConfig(format!(
                "page margins leave no content area ({:.1} x {:.1} pt)",
                width, height
            )));
        }

        let columns = self.canvas_width()?.get();
        let total_gap = self.column_gap * (columns - 1) as f64;
        if total_gap >= width {
            return Err(MoodboardError::InvalidConfig(format!(
                "columnGap {} leaves no room for {} columns in {:.1} pt",
                self.column_gap, columns, width
            )));
        }

        // Every piece placed on its own must fit on an empty page.
        let tallest = [
            ("rowHeight", self.row_height),
            ("spreadHeight", self.spread_height),
            ("headingHeight + rowHeight", self.heading_height + self.row_height),
        ];
        for (name, value) in tallest {
            if value > height {
                return Err(MoodboardError::InvalidConfig(format!(
                    "{} ({}) exceeds the page content height ({:.1} pt)",
                    name, value, height
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for an export page: size, margins, orientation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Page size. Defaults to A4.
    #[serde(default)]
    pub size: PageSize,

    /// Page margins in points.
    #[serde(default = "default_margin")]
    pub margin: Edges,

    /// Swap width and height.
    #[serde(default)]
    pub landscape: bool,
}

fn default_margin() -> Edges {
    Edges::uniform(36.0)
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: default_margin(),
            landscape: false,
        }
    }
}

impl PageConfig {
    /// Page (width, height) after applying orientation.
    pub fn dimensions(&self) -> (f64, f64) {
        let (w, h) = self.size.dimensions();
        if self.landscape {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Content box (width, height) inside the margins.
    pub fn content_size(&self) -> (f64, f64) {
        let (w, h) = self.dimensions();
        (w - self.margin.horizontal(), h - self.margin.vertical())
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Tabloid => (792.0, 1224.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for page margins.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
