use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for ids — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Unique identifier for one *placement* of a flower.
///
/// Distinct from [`FlowerTypeId`]: the same flower type may be placed many
/// times, and each placement gets its own `InstanceId`. Ids stay unique for
/// the lifetime of the arrangement; persistence collaborators may regenerate
/// them on load.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Spur);

impl InstanceId {
    /// Intern an existing id string (or return the already-interned id).
    pub fn intern(s: &str) -> Self {
        InstanceId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh unique id for a new placement.
    pub fn fresh() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("item_{n}"))
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl Serialize for InstanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstanceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(InstanceId::intern(&s))
    }
}

/// Opaque key referencing a catalog flower type.
///
/// The engine never interprets it; the catalog collaborator owns its meaning.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowerTypeId(Spur);

impl FlowerTypeId {
    pub fn intern(s: &str) -> Self {
        FlowerTypeId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for FlowerTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Display for FlowerTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl Serialize for FlowerTypeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FlowerTypeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FlowerTypeId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = FlowerTypeId::intern("peony_coral");
        let b = FlowerTypeId::intern("peony_coral");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "peony_coral");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = InstanceId::fresh();
        let b = InstanceId::fresh();
        assert_ne!(a, b);
    }
}
