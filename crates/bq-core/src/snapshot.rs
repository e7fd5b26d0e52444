//! Serializable snapshot for the persistence collaborator.
//!
//! Only catalog keys and transforms survive a save/load round trip;
//! instance ids are regenerated on restore. Format versioning is the
//! collaborator's concern, not the engine's.

use crate::id::{FlowerTypeId, InstanceId};
use crate::model::{Arrangement, ArrangementConfig, Color, Item, Vec2, WrapStyle};
use serde::{Deserialize, Serialize};

/// One saved placement — everything an [`Item`] carries except its
/// instance id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotItem {
    pub flower: FlowerTypeId,
    pub color: Color,
    pub image_ref: String,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub stack_order: i32,
}

/// The serializable shape handed to (and accepted from) save/load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangementSnapshot {
    pub items: Vec<SnapshotItem>,
    pub wrap_style: WrapStyle,
    pub ribbon_color: Color,
}

impl ArrangementSnapshot {
    /// Capture the current arrangement. Instance ids are dropped here;
    /// they are not part of the persisted contract.
    pub fn capture(arrangement: &Arrangement) -> Self {
        Self {
            items: arrangement
                .items
                .iter()
                .map(|it| SnapshotItem {
                    flower: it.flower,
                    color: it.color,
                    image_ref: it.image_ref.clone(),
                    position: it.position,
                    rotation: it.rotation,
                    scale: it.scale,
                    stack_order: it.stack_order,
                })
                .collect(),
            wrap_style: arrangement.wrap_style,
            ribbon_color: arrangement.ribbon_color,
        }
    }

    /// Rebuild a live arrangement with freshly minted instance ids.
    /// Scales re-clamp against the current configuration in case bounds
    /// changed since the snapshot was taken.
    pub fn restore(&self, config: &ArrangementConfig) -> Arrangement {
        Arrangement {
            items: self
                .items
                .iter()
                .map(|si| Item {
                    id: InstanceId::fresh(),
                    flower: si.flower,
                    color: si.color,
                    image_ref: si.image_ref.clone(),
                    position: si.position,
                    rotation: si.rotation,
                    scale: config.clamp_scale(si.scale),
                    stack_order: si.stack_order,
                })
                .collect(),
            wrap_style: self.wrap_style,
            ribbon_color: self.ribbon_color,
            size_scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn arrangement_with_one_item() -> Arrangement {
        Arrangement {
            items: vec![Item {
                id: InstanceId::fresh(),
                flower: FlowerTypeId::intern("snap_tulip"),
                color: Color::rgb(240, 200, 60),
                image_ref: "tulip.png".into(),
                position: Vec2::new(42.0, -17.5),
                rotation: 400.0,
                scale: 1.4,
                stack_order: 20,
            }],
            wrap_style: WrapStyle::Kraft,
            ribbon_color: Color::rgb(10, 20, 30),
            size_scale: 1.0,
        }
    }

    #[test]
    fn json_roundtrip_preserves_transforms() {
        let snapshot = ArrangementSnapshot::capture(&arrangement_with_one_item());
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ArrangementSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn restore_regenerates_instance_ids() {
        let original = arrangement_with_one_item();
        let snapshot = ArrangementSnapshot::capture(&original);
        let restored = snapshot.restore(&ArrangementConfig::default());

        assert_ne!(restored.items[0].id, original.items[0].id);
        assert_eq!(restored.items[0].flower, original.items[0].flower);
        assert_eq!(restored.items[0].position, original.items[0].position);
        assert_eq!(restored.wrap_style, WrapStyle::Kraft);
    }

    #[test]
    fn restore_reclamps_against_new_bounds() {
        let snapshot = ArrangementSnapshot::capture(&arrangement_with_one_item());
        let tight = ArrangementConfig {
            scale_max: 1.0,
            ..Default::default()
        };
        let restored = snapshot.restore(&tight);
        assert_eq!(restored.items[0].scale, 1.0);
    }
}
