//! Core data model for bouquet arrangements.
//!
//! An [`Arrangement`] is an ordered list of placed [`Item`]s plus styling
//! parameters. Items carry their own transform (position, rotation, scale,
//! stack order); positions are relative to the arrangement's local origin,
//! which the renderer maps into canvas space. Overlap between items is
//! permitted — stack order decides who draws on top.

use crate::id::{FlowerTypeId, InstanceId};
use serde::{Deserialize, Serialize};

/// Canonical composition surface width in working units.
pub const CANVAS_WIDTH: f32 = 600.0;
/// Canonical composition surface height in working units.
pub const CANVAS_HEIGHT: f32 = 680.0;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        fn nibble(c: u8) -> Option<u8> {
            (c as char).to_digit(16).map(|v| v as u8)
        }
        fn pair(b: &[u8]) -> Option<u8> {
            Some((nibble(*b.first()?)? << 4) | nibble(*b.get(1)?)?)
        }

        let bytes = hex.strip_prefix('#').unwrap_or(hex).as_bytes();
        match bytes.len() {
            3 => Some(Self::rgb(
                nibble(bytes[0])? * 17,
                nibble(bytes[1])? * 17,
                nibble(bytes[2])? * 17,
            )),
            6 => Some(Self::rgb(
                pair(&bytes[0..2])?,
                pair(&bytes[2..4])?,
                pair(&bytes[4..6])?,
            )),
            8 => Some(Self::rgba(
                pair(&bytes[0..2])?,
                pair(&bytes[2..4])?,
                pair(&bytes[4..6])?,
                pair(&bytes[6..8])?,
            )),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// 2D point/vector in working units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ─── Catalog types ───────────────────────────────────────────────────────

/// Coarse flower role, used for default stacking when templates don't
/// specify an explicit stack order: focal blooms sit above filler, filler
/// above greenery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowerCategory {
    Focal,
    Filler,
    Greenery,
}

impl FlowerCategory {
    /// Default stack order for template items without an explicit one.
    pub fn default_stack_order(self) -> i32 {
        match self {
            FlowerCategory::Focal => 30,
            FlowerCategory::Filler => 20,
            FlowerCategory::Greenery => 10,
        }
    }
}

/// A catalog entry as supplied by the catalog collaborator.
///
/// The engine reads only `color`, `image_ref` and `category`; everything
/// else passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub flower: FlowerTypeId,
    pub name: String,
    pub color: Color,
    pub image_ref: String,
    pub category: FlowerCategory,
    pub stock: u32,
}

// ─── Placed items ────────────────────────────────────────────────────────

/// One placed flower instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique per placement; never reused within an arrangement's lifetime.
    pub id: InstanceId,
    /// Opaque catalog key.
    pub flower: FlowerTypeId,
    /// Cached from the catalog for rendering fallback.
    pub color: Color,
    /// Cached from the catalog; resolved by the renderer's image source.
    pub image_ref: String,
    /// Relative to the arrangement's local origin.
    pub position: Vec2,
    /// Degrees, unbounded; wraps at 360 only for display.
    pub rotation: f32,
    /// Always within the configured scale bounds.
    pub scale: f32,
    /// Higher draws on top; ties broken by insertion order.
    pub stack_order: i32,
}

impl Item {
    /// Rotation normalized into `[0, 360)` for display purposes.
    pub fn display_rotation(&self) -> f32 {
        self.rotation.rem_euclid(360.0)
    }
}

// ─── Arrangement style ───────────────────────────────────────────────────

/// Outer wrap styling, keyed to a fixed inner/outer gradient palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapStyle {
    #[default]
    Classic,
    Kraft,
    Blush,
    Midnight,
}

impl WrapStyle {
    /// Gradient colors (inner, outer) for the wrap shape.
    pub fn gradient(self) -> (Color, Color) {
        match self {
            WrapStyle::Classic => (Color::rgb(0xFD, 0xFB, 0xF5), Color::rgb(0xE8, 0xDF, 0xD0)),
            WrapStyle::Kraft => (Color::rgb(0xD9, 0xB9, 0x8A), Color::rgb(0xB0, 0x8A, 0x5C)),
            WrapStyle::Blush => (Color::rgb(0xFC, 0xE4, 0xEC), Color::rgb(0xF0, 0xB9, 0xC9)),
            WrapStyle::Midnight => (Color::rgb(0x3E, 0x42, 0x5C), Color::rgb(0x23, 0x26, 0x38)),
        }
    }
}

// ─── Arrangement ─────────────────────────────────────────────────────────

/// The full set of placed items plus styling for one bouquet composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    /// Insertion-ordered placed items.
    pub items: Vec<Item>,
    pub wrap_style: WrapStyle,
    pub ribbon_color: Color,
    /// Uniform multiplier applied at render time only — never mutates the
    /// stored per-item scale.
    pub size_scale: f32,
}

impl Default for Arrangement {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            wrap_style: WrapStyle::default(),
            ribbon_color: Color::rgb(0xC2, 0x3B, 0x5A),
            size_scale: 1.0,
        }
    }
}

impl Arrangement {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a placed item by instance id.
    pub fn item(&self, id: InstanceId) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    /// Item indices in draw order: ascending stack order, ties broken by
    /// insertion order (stable sort).
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by_key(|&i| self.items[i].stack_order);
        order
    }
}

// ─── Configuration ───────────────────────────────────────────────────────

/// Engine-level limits applied by the arrangement model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrangementConfig {
    /// Inclusive scale bounds for every placed item.
    pub scale_min: f32,
    pub scale_max: f32,
    /// When set, `add` refuses new placements past this count.
    pub max_items: Option<usize>,
}

impl Default for ArrangementConfig {
    fn default() -> Self {
        Self {
            scale_min: 0.5,
            scale_max: 2.0,
            max_items: None,
        }
    }
}

impl ArrangementConfig {
    /// Clamp a requested scale into the configured bounds.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.scale_min, self.scale_max)
    }
}
