//! Deterministic slot placement for the Nth item in an arrangement.
//!
//! Slots are precomputed once per configuration into concentric rings
//! around the local origin: one center slot, then rings of `6·k` slots at
//! increasing radius. A small periodic wobble (a smooth function of the
//! slot index, not a random source) nudges angle and radius so the layout
//! reads organically while staying exactly reproducible — tests can assert
//! coordinates bit-for-bit.

use crate::model::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Golden angle in radians; drives the overflow spiral.
const GOLDEN_ANGLE: f32 = 2.399_963;

/// A precomputed target transform for the Nth placed item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub position: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub scale: f32,
    pub stack_order: i32,
}

/// Ring geometry and jitter tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotConfig {
    /// Number of precomputed rings beyond the center slot.
    pub rings: usize,
    /// Radius of ring 1 in working units.
    pub first_radius: f32,
    /// Radial distance between consecutive rings.
    pub ring_spacing: f32,
    /// Angle of the first slot in each ring, radians.
    pub start_angle: f32,
    /// Max angular wobble, radians.
    pub angle_jitter: f32,
    /// Max radial wobble, working units.
    pub radius_jitter: f32,
    /// Max outward lean, degrees.
    pub tilt: f32,
    /// Secondary rotation wobble, degrees.
    pub rotation_jitter: f32,
    /// Overflow ring radius = last ring radius + spacing × this factor.
    /// The upstream overflow constants read like an approximation, so they
    /// are tunable here rather than fixed.
    pub overflow_radius_step: f32,
    /// Fixed scale for overflow slots.
    pub overflow_scale: f32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            rings: 3,
            first_radius: 58.0,
            ring_spacing: 52.0,
            start_angle: -FRAC_PI_2,
            angle_jitter: 0.09,
            radius_jitter: 5.0,
            tilt: 14.0,
            rotation_jitter: 4.0,
            overflow_radius_step: 1.6,
            overflow_scale: 0.78,
        }
    }
}

/// Smooth, reproducible pseudo-wobble in `[-1, 1]` for a slot index.
fn wobble(index: usize, freq: f32) -> f32 {
    (index as f32 * freq).sin()
}

/// Precomputed slot table. Construction walks the configured rings once;
/// lookups are O(1) and total (overflow indices resolve to a wide outer
/// ring computed on the fly).
#[derive(Debug, Clone)]
pub struct SlotTable {
    config: SlotConfig,
    slots: Vec<Slot>,
}

impl SlotTable {
    pub fn new(config: SlotConfig) -> Self {
        let capacity = 1 + (1..=config.rings).map(|k| 6 * k).sum::<usize>();
        let mut slots = Vec::with_capacity(capacity);

        // Ring 0: single center slot, largest and topmost.
        slots.push(Slot {
            position: Vec2::new(0.0, 0.0),
            rotation: 0.0,
            scale: 1.1,
            stack_order: (config.rings as i32 + 1) * 10,
        });

        for ring in 1..=config.rings {
            let count = 6 * ring;
            let base_radius = config.first_radius + (ring as f32 - 1.0) * config.ring_spacing;
            let scale = (1.0 - 0.07 * (ring as f32 - 1.0)).max(0.6);
            let stack_order = (config.rings as i32 - ring as i32 + 1) * 10;

            for i in 0..count {
                let index = slots.len();
                let theta = config.start_angle
                    + (i as f32 / count as f32) * TAU
                    + config.angle_jitter * wobble(index, GOLDEN_ANGLE);
                let radius = base_radius + config.radius_jitter * wobble(index, 1.71);
                slots.push(Slot {
                    position: Vec2::new(radius * theta.cos(), radius * theta.sin()),
                    rotation: lean(&config, index, theta),
                    scale,
                    stack_order,
                });
            }
        }

        log::debug!(
            "slot table built: {} rings, {} precomputed slots",
            config.rings,
            slots.len()
        );
        Self { config, slots }
    }

    /// Number of precomputed slots (overflow lookups extend past this).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// The slot for the Nth placed item. Pure and total: the same index
    /// always yields the same slot for a given configuration, and indices
    /// past the precomputed table resolve to the overflow ring.
    pub fn slot_for(&self, index: usize) -> Slot {
        if let Some(slot) = self.slots.get(index) {
            return *slot;
        }
        self.overflow_slot(index)
    }

    /// Wide single outer ring for indices beyond the table: fixed larger
    /// radius, lower fixed scale, bottom stack order. Slots advance by the
    /// golden angle so arbitrarily many items stay spread out.
    fn overflow_slot(&self, index: usize) -> Slot {
        let n = (index - self.slots.len()) as f32;
        let last_ring_radius = self.config.first_radius
            + (self.config.rings.max(1) as f32 - 1.0) * self.config.ring_spacing;
        let radius = last_ring_radius + self.config.ring_spacing * self.config.overflow_radius_step;
        let theta = self.config.start_angle + n * GOLDEN_ANGLE;
        Slot {
            position: Vec2::new(radius * theta.cos(), radius * theta.sin()),
            rotation: lean(&self.config, index, theta),
            scale: self.config.overflow_scale,
            stack_order: 0,
        }
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new(SlotConfig::default())
    }
}

/// Gentle outward lean: horizontal component of the slot angle maps to a
/// signed rotation, so left-side flowers lean left and right-side flowers
/// lean right, plus a secondary wobble term.
fn lean(config: &SlotConfig, index: usize, theta: f32) -> f32 {
    config.tilt * theta.cos() + config.rotation_jitter * wobble(index, 3.07)
}
