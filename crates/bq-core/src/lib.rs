pub mod id;
pub mod model;
pub mod slots;
pub mod snapshot;
pub mod template;

pub use id::{FlowerTypeId, InstanceId};
pub use model::*;
pub use slots::{Slot, SlotConfig, SlotTable};
pub use snapshot::{ArrangementSnapshot, SnapshotItem};
pub use template::{Preset, Template, TemplateItem};
