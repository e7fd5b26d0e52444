//! Pointer input abstraction for the interaction boundary.
//!
//! The host environment (mouse, touch, whatever) normalizes its events
//! into this shape before feeding the drag gesture. Pointer capture and
//! hit-testing stay on the host side; the engine only sees positions.

/// A normalized pointer event in composition-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
}

impl PointerEvent {
    pub fn position(&self) -> (f32, f32) {
        match *self {
            Self::Down { x, y } | Self::Move { x, y } | Self::Up { x, y } => (x, y),
        }
    }
}
