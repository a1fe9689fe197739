//! Placed-element identifiers.
//!
//! Ids are interned once and then compared as 4-byte keys. Fresh ids come
//! from a process-wide counter, so two elements created in the same instant
//! never collide.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static ELEMENT_IDS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);
static NEXT_ELEMENT: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Look up or intern an existing id, e.g. one read from a stored document.
    pub fn intern(raw: &str) -> Self {
        Self(ELEMENT_IDS.get_or_intern(raw))
    }

    /// A never-before-issued id of the form `element-N`.
    pub fn generate() -> Self {
        let n = NEXT_ELEMENT.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("element-{n}"))
    }

    pub fn as_str(&self) -> &str {
        ELEMENT_IDS.resolve(&self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{self}")
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|raw| Self::intern(&raw))
    }
}
