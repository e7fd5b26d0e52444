//! Builder session: the arrangement model paired with its history.
//!
//! This is where the commit policy lives. Every discrete action (add,
//! remove, clear, template apply, drag drop) records exactly one history
//! checkpoint; continuous drag motion flows through the non-committing
//! path and stays invisible to history until the gesture ends.

use crate::arrangement::{ArrangementModel, TransformPatch};
use crate::history::{DEFAULT_HISTORY_CAP, HistoryManager};
use bq_core::model::{Arrangement, ArrangementConfig, CatalogEntry, Vec2, WrapStyle};
use bq_core::slots::SlotConfig;
use bq_core::template::{Preset, Template};
use bq_core::{Color, InstanceId};

/// One arrangement under edit, with its own independent history.
#[derive(Debug)]
pub struct BuilderSession {
    model: ArrangementModel,
    history: HistoryManager,
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new(
            ArrangementConfig::default(),
            SlotConfig::default(),
            DEFAULT_HISTORY_CAP,
        )
    }
}

impl BuilderSession {
    pub fn new(config: ArrangementConfig, slot_config: SlotConfig, history_cap: usize) -> Self {
        Self {
            model: ArrangementModel::new(config, slot_config),
            history: HistoryManager::new(history_cap),
        }
    }

    pub fn arrangement(&self) -> &Arrangement {
        self.model.arrangement()
    }

    pub fn model(&self) -> &ArrangementModel {
        &self.model
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    // ─── Discrete actions (each commits once) ────────────────────────────

    /// Add a catalog flower; commits on success.
    pub fn add_flower(
        &mut self,
        entry: &CatalogEntry,
        position_override: Option<Vec2>,
    ) -> Option<InstanceId> {
        let id = self.model.add(entry, position_override)?;
        self.commit();
        Some(id)
    }

    /// Remove an item; commits only when something was actually removed.
    pub fn remove_item(&mut self, id: InstanceId) -> bool {
        let removed = self.model.remove(id);
        if removed {
            self.commit();
        }
        removed
    }

    /// Empty the arrangement; always commits.
    pub fn clear(&mut self) {
        self.model.clear();
        self.commit();
    }

    /// Replace the item list from a template; commits.
    pub fn apply_template(&mut self, template: &Template) {
        self.model.apply_template(template);
        self.commit();
    }

    /// Presets apply through the template path.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.apply_template(preset);
    }

    /// Apply a transform patch as a discrete action (e.g. a rotation dial
    /// release); commits only when the id was known.
    pub fn update_item(&mut self, id: InstanceId, patch: &TransformPatch) -> bool {
        let applied = self.model.update(id, patch);
        if applied {
            self.commit();
        }
        applied
    }

    // ─── Continuous path (never commits) ─────────────────────────────────

    /// Live mid-drag move. History never sees these.
    pub fn drag_translate(&mut self, id: InstanceId, dx: f32, dy: f32) -> bool {
        self.model.translate(id, dx, dy)
    }

    /// Apply the final transform of a gesture without committing; the
    /// gesture owner calls [`Self::commit_gesture`] exactly once after.
    pub fn apply_gesture_transform(&mut self, id: InstanceId, patch: &TransformPatch) -> bool {
        self.model.update(id, patch)
    }

    /// The single commit at the end of a successful drag gesture.
    pub fn commit_gesture(&mut self) {
        self.commit();
    }

    // ─── Style parameters (not part of item history) ─────────────────────

    pub fn set_wrap_style(&mut self, style: WrapStyle) {
        self.model.set_wrap_style(style);
    }

    pub fn set_ribbon_color(&mut self, color: Color) {
        self.model.set_ribbon_color(color);
    }

    pub fn set_size_scale(&mut self, size_scale: f32) {
        self.model.set_size_scale(size_scale);
    }

    // ─── Undo / redo ─────────────────────────────────────────────────────

    /// Restore the previous checkpoint. Returns `false` at the start of
    /// history.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        let items = entry.items().to_vec();
        self.model.restore_items(items);
        log::debug!("undo -> {} items", self.model.items().len());
        true
    }

    /// Restore the next checkpoint. Returns `false` at the end of history.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        let items = entry.items().to_vec();
        self.model.restore_items(items);
        log::debug!("redo -> {} items", self.model.items().len());
        true
    }

    fn commit(&mut self) {
        self.history.commit(self.model.snapshot_items());
    }
}
