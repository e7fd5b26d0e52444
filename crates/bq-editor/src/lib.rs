pub mod arrangement;
pub mod drag;
pub mod history;
pub mod input;
pub mod session;

pub use arrangement::{ArrangementModel, TransformPatch};
pub use drag::{DragGesture, DragSource, DropOutcome, DropTarget};
pub use history::{DEFAULT_HISTORY_CAP, HistoryEntry, HistoryManager};
pub use input::PointerEvent;
pub use session::BuilderSession;
