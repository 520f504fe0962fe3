//! Agent identifiers.
//!
//! Agents are identified by name (`"car1"`, `"ego"`, …) rather than by a
//! dense integer index: the scenario driver adds and removes agents between
//! controller edits, and the incremental cache (`verse-cache`) keys segments
//! by `(agent_id, mode_tuple, init)` across runs where a purely positional
//! index would silently shift.  `AgentId` wraps an `Arc<str>` so cloning is
//! cheap (one refcount bump) while equality, ordering, and hashing are by
//! value — exactly what the cache and the joint-state map need.

use std::fmt;
use std::sync::Arc;

/// A cheaply-cloneable, string-backed agent identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(Arc<str>);

impl AgentId {
    /// Build an `AgentId` from any string-like value.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Borrow the underlying name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        AgentId::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        AgentId::new(s)
    }
}
