//! Discrete mode values and mode tuples.
//!
//! A mode *category* (e.g. `AgentMode`, `TrackMode`) declares a finite set of
//! named values; an agent's discrete state at any instant is a `ModeTuple` —
//! one `ModeValue` per declared category, in declaration order (§3 invariant
//! iv).  Values are plain interned-by-clone strings rather than a compiled
//! Rust `enum`, because the categories themselves are controller-IR data,
//! not known at this crate's compile time.

use std::fmt;
use std::sync::Arc;

/// One value of one declared mode category (e.g. `"SwitchLeft"`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeValue(Arc<str>);

impl ModeValue {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModeValue {
    fn from(s: &str) -> Self {
        ModeValue::new(s)
    }
}

impl From<String> for ModeValue {
    fn from(s: String) -> Self {
        ModeValue::new(s)
    }
}

/// An ordered tuple of discrete mode values, one per declared mode category.
///
/// `ModeTuple` is the `src_mode`/`dst_mode` of every transition (§3).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeTuple(pub Vec<ModeValue>);

impl ModeTuple {
    pub fn new(values: Vec<ModeValue>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModeTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

/// The destination mode of a transition: either a concrete mode tuple, or
/// the "no successor" sentinel (§7, §9) for a fired guard whose resets
/// produced an empty set of candidate discrete assignments.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    Mode(ModeTuple),
    /// No valid next mode was produced even though a guard fired.
    None,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Mode(m) => write!(f, "{m}"),
            Destination::None => write!(f, "None"),
        }
    }
}
