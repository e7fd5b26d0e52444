//! The canonical mutable arrangement and its operations.
//!
//! All mutation goes through [`ArrangementModel`] so invariants hold no
//! matter who calls: instance ids stay unique for the model's lifetime,
//! scales stay inside the configured bounds, and unknown ids degrade to
//! silent no-ops instead of errors. History commits are *not* wired here —
//! the [`crate::session::BuilderSession`] decides which mutations are
//! discrete actions worth a snapshot.

use bq_core::model::{Arrangement, ArrangementConfig, CatalogEntry, Item, Vec2, WrapStyle};
use bq_core::slots::{SlotConfig, SlotTable};
use bq_core::template::Template;
use bq_core::{Color, InstanceId};

/// Partial transform for `update`: only the `Some` fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPatch {
    pub position: Option<Vec2>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub stack_order: Option<i32>,
}

impl TransformPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            position: Some(Vec2::new(x, y)),
            ..Default::default()
        }
    }
}

/// Ordered collection of placed items plus style parameters, with the
/// slot table used for automatic placement.
#[derive(Debug, Clone)]
pub struct ArrangementModel {
    arrangement: Arrangement,
    config: ArrangementConfig,
    slots: SlotTable,
}

impl Default for ArrangementModel {
    fn default() -> Self {
        Self::new(ArrangementConfig::default(), SlotConfig::default())
    }
}

impl ArrangementModel {
    pub fn new(config: ArrangementConfig, slot_config: SlotConfig) -> Self {
        Self {
            arrangement: Arrangement::default(),
            config,
            slots: SlotTable::new(slot_config),
        }
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    pub fn items(&self) -> &[Item] {
        &self.arrangement.items
    }

    pub fn config(&self) -> &ArrangementConfig {
        &self.config
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// Place a catalog flower. The slot for the current item count supplies
    /// the transform; a drop-onto-canvas gesture may override the position.
    /// Returns `None` only when the configured max item count is reached.
    pub fn add(
        &mut self,
        entry: &CatalogEntry,
        position_override: Option<Vec2>,
    ) -> Option<InstanceId> {
        if let Some(max) = self.config.max_items
            && self.arrangement.items.len() >= max
        {
            log::warn!("add rejected: arrangement full ({max} items)");
            return None;
        }

        let slot = self.slots.slot_for(self.arrangement.items.len());
        let id = InstanceId::fresh();
        self.arrangement.items.push(Item {
            id,
            flower: entry.flower,
            color: entry.color,
            image_ref: entry.image_ref.clone(),
            position: position_override.unwrap_or(slot.position),
            rotation: slot.rotation,
            scale: self.config.clamp_scale(slot.scale),
            stack_order: slot.stack_order,
        });
        log::debug!("added {} ({})", id, entry.flower);
        Some(id)
    }

    /// Merge a partial transform into an item. Unknown ids are a silent
    /// no-op (`false`); scale is clamped into the configured bounds.
    pub fn update(&mut self, id: InstanceId, patch: &TransformPatch) -> bool {
        let Some(item) = self.arrangement.items.iter_mut().find(|it| it.id == id) else {
            log::debug!("update on unknown id {id}, ignoring");
            return false;
        };
        if let Some(position) = patch.position {
            item.position = position;
        }
        if let Some(rotation) = patch.rotation {
            item.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            item.scale = self.config.clamp_scale(scale);
        }
        if let Some(stack_order) = patch.stack_order {
            item.stack_order = stack_order;
        }
        true
    }

    /// Move an item by a delta. Used by the drag path for live feedback;
    /// same no-op contract as `update`.
    pub fn translate(&mut self, id: InstanceId, dx: f32, dy: f32) -> bool {
        let Some(item) = self.arrangement.items.iter_mut().find(|it| it.id == id) else {
            return false;
        };
        item.position.x += dx;
        item.position.y += dy;
        true
    }

    /// Remove an item; no-op `false` if absent.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        let before = self.arrangement.items.len();
        self.arrangement.items.retain(|it| it.id != id);
        let removed = self.arrangement.items.len() != before;
        if removed {
            log::debug!("removed {id}");
        }
        removed
    }

    /// Empty the item list. Always succeeds.
    pub fn clear(&mut self) {
        self.arrangement.items.clear();
    }

    /// Replace the item list with a freshly re-keyed copy of the template.
    pub fn apply_template(&mut self, template: &Template) {
        self.arrangement.items = template.instantiate(&self.config);
        log::debug!(
            "applied template '{}': {} items",
            template.name,
            self.arrangement.items.len()
        );
    }

    pub fn set_wrap_style(&mut self, style: WrapStyle) {
        self.arrangement.wrap_style = style;
    }

    pub fn set_ribbon_color(&mut self, color: Color) {
        self.arrangement.ribbon_color = color;
    }

    /// Render-time multiplier; stored item scales are untouched.
    pub fn set_size_scale(&mut self, size_scale: f32) {
        self.arrangement.size_scale = size_scale.max(0.0);
    }

    /// Deep copy of the item list for a history entry.
    pub fn snapshot_items(&self) -> Vec<Item> {
        self.arrangement.items.clone()
    }

    /// Replace the live item list from a history entry.
    pub fn restore_items(&mut self, items: Vec<Item>) {
        self.arrangement.items = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bq_core::model::FlowerCategory;
    use bq_core::template::TemplateItem;
    use bq_core::{FlowerTypeId, SlotTable};

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry {
            flower: FlowerTypeId::intern(name),
            name: name.to_string(),
            color: Color::rgb(210, 60, 110),
            image_ref: format!("{name}.png"),
            category: FlowerCategory::Focal,
            stock: 12,
        }
    }

    #[test]
    fn sequential_adds_follow_the_slot_table() {
        let mut model = ArrangementModel::default();
        let table = SlotTable::default();
        for _ in 0..3 {
            model.add(&entry("rose"), None).unwrap();
        }
        for (i, item) in model.items().iter().enumerate() {
            let slot = table.slot_for(i);
            assert_eq!(item.position, slot.position);
            assert_eq!(item.rotation, slot.rotation);
            assert_eq!(item.stack_order, slot.stack_order);
        }
    }

    #[test]
    fn add_respects_position_override() {
        let mut model = ArrangementModel::default();
        let id = model
            .add(&entry("rose"), Some(Vec2::new(77.0, -40.0)))
            .unwrap();
        let item = model.arrangement().item(id).unwrap();
        assert_eq!(item.position, Vec2::new(77.0, -40.0));
        // Everything but position still comes from the slot.
        assert_eq!(item.scale, SlotTable::default().slot_for(0).scale);
    }

    #[test]
    fn add_refuses_past_max_items() {
        let config = ArrangementConfig {
            max_items: Some(2),
            ..Default::default()
        };
        let mut model = ArrangementModel::new(config, SlotConfig::default());
        assert!(model.add(&entry("a"), None).is_some());
        assert!(model.add(&entry("b"), None).is_some());
        assert!(model.add(&entry("c"), None).is_none());
        assert_eq!(model.items().len(), 2);
    }

    #[test]
    fn update_unknown_id_leaves_items_untouched() {
        let mut model = ArrangementModel::default();
        model.add(&entry("rose"), None).unwrap();
        let before = model.snapshot_items();

        let ghost = InstanceId::fresh();
        assert!(!model.update(ghost, &TransformPatch::position(5.0, 5.0)));
        assert_eq!(model.items(), &before[..]);
    }

    #[test]
    fn update_clamps_scale() {
        let mut model = ArrangementModel::default();
        let id = model.add(&entry("rose"), None).unwrap();
        let patch = TransformPatch {
            scale: Some(12.0),
            ..Default::default()
        };
        assert!(model.update(id, &patch));
        assert_eq!(model.arrangement().item(id).unwrap().scale, 2.0);
    }

    #[test]
    fn remove_and_clear() {
        let mut model = ArrangementModel::default();
        let id = model.add(&entry("rose"), None).unwrap();
        assert!(model.remove(id));
        assert!(!model.remove(id));

        model.add(&entry("fern"), None).unwrap();
        model.clear();
        assert!(model.items().is_empty());
    }

    #[test]
    fn instance_ids_stay_unique_across_removals() {
        let mut model = ArrangementModel::default();
        let first = model.add(&entry("rose"), None).unwrap();
        model.remove(first);
        let second = model.add(&entry("rose"), None).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn apply_template_replaces_items() {
        let mut model = ArrangementModel::default();
        model.add(&entry("rose"), None).unwrap();

        let template = Template {
            name: "posy".into(),
            items: vec![TemplateItem {
                flower: FlowerTypeId::intern("tulip"),
                color: Color::rgb(250, 210, 70),
                image_ref: "tulip.png".into(),
                category: FlowerCategory::Filler,
                x_pct: 50.0,
                y_pct: 50.0,
                rotation: 0.0,
                scale: 1.0,
                stack_order: None,
            }],
        };
        model.apply_template(&template);
        assert_eq!(model.items().len(), 1);
        assert_eq!(model.items()[0].flower, FlowerTypeId::intern("tulip"));
    }
}
