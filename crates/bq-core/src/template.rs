//! Named layout templates and presets.
//!
//! A template stores item placements in percent-of-canvas coordinates so
//! the same layout works at any canvas size. Applying a template replaces
//! the arrangement's item list with a freshly re-keyed copy: every
//! application mints new instance ids, even for the same template twice.

use crate::id::{FlowerTypeId, InstanceId};
use crate::model::{
    ArrangementConfig, CANVAS_HEIGHT, CANVAS_WIDTH, Color, FlowerCategory, Item, Vec2,
};
use serde::{Deserialize, Serialize};

/// One placement inside a template, in percent-of-canvas coordinates
/// (`0..100` on both axes, `50/50` = canvas center).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub flower: FlowerTypeId,
    pub color: Color,
    pub image_ref: String,
    pub category: FlowerCategory,
    pub x_pct: f32,
    pub y_pct: f32,
    /// Degrees.
    pub rotation: f32,
    pub scale: f32,
    /// Explicit stack order; falls back to the category default
    /// (focal > filler > greenery) when absent.
    pub stack_order: Option<i32>,
}

/// A named layout supplied by the template/preset collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub items: Vec<TemplateItem>,
}

/// Presets are curated templates; they apply through the same path.
pub type Preset = Template;

impl Template {
    /// Materialize the template into placed items: fresh instance ids,
    /// percent coordinates scaled into working units around the local
    /// origin, scales clamped to the configured bounds.
    pub fn instantiate(&self, config: &ArrangementConfig) -> Vec<Item> {
        let items: Vec<Item> = self
            .items
            .iter()
            .map(|ti| Item {
                id: InstanceId::fresh(),
                flower: ti.flower,
                color: ti.color,
                image_ref: ti.image_ref.clone(),
                position: Vec2::new(
                    (ti.x_pct / 100.0 - 0.5) * CANVAS_WIDTH,
                    (ti.y_pct / 100.0 - 0.5) * CANVAS_HEIGHT,
                ),
                rotation: ti.rotation,
                scale: config.clamp_scale(ti.scale),
                stack_order: ti
                    .stack_order
                    .unwrap_or_else(|| ti.category.default_stack_order()),
            })
            .collect();
        log::debug!("template '{}' instantiated: {} items", self.name, items.len());
        items
    }
}
