//! Drag-and-drop gesture contract.
//!
//! The host adapter owns pointer capture and hit-testing; this type holds
//! the parts the engine cares about: what is being dragged (a new catalog
//! flower or an existing placement), the cumulative delta, and the single
//! model mutation + history commit at drop. Mid-drag motion only
//! accumulates here — any live visual feedback is the adapter's own
//! concern and must never route through the committing path.
//!
//! Coordinates are arrangement-local (origin at the bouquet center); the
//! adapter converts from screen space before calling in.

use crate::arrangement::TransformPatch;
use crate::input::PointerEvent;
use crate::session::BuilderSession;
use bq_core::InstanceId;
use bq_core::model::{CatalogEntry, Vec2};

/// What the gesture started on.
#[derive(Debug, Clone)]
pub enum DragSource {
    /// A catalog entry dragged in from outside the surface.
    Catalog(CatalogEntry),
    /// An already-placed item.
    Placed(InstanceId),
}

/// Where the pointer was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The composition surface: the drop takes effect.
    Surface,
    /// Anywhere else: the gesture is abandoned.
    Void,
}

/// What a completed gesture did to the arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A new item was placed.
    Placed(InstanceId),
    /// An existing item was moved.
    Moved(InstanceId),
    /// Nothing changed (dropped into the void, unknown id, or full).
    Ignored,
}

/// One in-flight drag. Construct at drag-start, feed pointer moves,
/// consume with [`DragGesture::drop`].
#[derive(Debug, Clone)]
pub struct DragGesture {
    source: DragSource,
    start: Vec2,
    current: Vec2,
    /// Position of the dragged item when the gesture began (placed items
    /// only); the drop applies `anchor + delta` in one update.
    anchor: Option<Vec2>,
}

impl DragGesture {
    /// Begin a drag at `(x, y)` in arrangement-local coordinates.
    pub fn begin(session: &BuilderSession, source: DragSource, x: f32, y: f32) -> Self {
        let anchor = match &source {
            DragSource::Placed(id) => session
                .arrangement()
                .item(*id)
                .map(|item| item.position),
            DragSource::Catalog(_) => None,
        };
        Self {
            source,
            start: Vec2::new(x, y),
            current: Vec2::new(x, y),
            anchor,
        }
    }

    /// Track a pointer event. Only `Move`/`Up` positions matter; nothing
    /// touches the model or history here.
    pub fn track(&mut self, event: &PointerEvent) {
        let (x, y) = event.position();
        self.current = Vec2::new(x, y);
    }

    /// Cumulative `{dx, dy}` since drag-start.
    pub fn delta(&self) -> Vec2 {
        Vec2::new(self.current.x - self.start.x, self.current.y - self.start.y)
    }

    pub fn source(&self) -> &DragSource {
        &self.source
    }

    /// Resolve the gesture. A surface drop performs exactly one model
    /// mutation and (when it took effect) exactly one history commit; a
    /// void drop leaves both untouched.
    pub fn drop(self, session: &mut BuilderSession, target: DropTarget) -> DropOutcome {
        if target == DropTarget::Void {
            log::debug!("drag abandoned outside the surface");
            return DropOutcome::Ignored;
        }

        let delta = self.delta();
        match self.source {
            DragSource::Placed(id) => {
                let Some(anchor) = self.anchor else {
                    // The item vanished mid-drag (e.g. a concurrent clear).
                    return DropOutcome::Ignored;
                };
                let patch =
                    TransformPatch::position(anchor.x + delta.x, anchor.y + delta.y);
                if session.apply_gesture_transform(id, &patch) {
                    session.commit_gesture();
                    DropOutcome::Moved(id)
                } else {
                    DropOutcome::Ignored
                }
            }
            DragSource::Catalog(entry) => {
                let at = Vec2::new(self.start.x + delta.x, self.start.y + delta.y);
                match session.add_flower(&entry, Some(at)) {
                    Some(id) => DropOutcome::Placed(id),
                    None => DropOutcome::Ignored,
                }
            }
        }
    }
}
