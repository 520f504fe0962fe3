//! `Region` — an agent's continuous state, either a concrete point
//! (simulation) or an axis-aligned rectangle (verification).

use crate::interval::Rect;

/// An agent's continuous state: a single point, or an interval box.
///
/// §3 "initial region (point or interval per continuous dimension)" — the
/// same union is reused for successor regions computed by the reset
/// applier, since a simulation reset always produces a point and a
/// verification reset always produces a rect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    Point(Vec<f64>),
    Rect(Rect),
}

impl Region {
    pub fn dims(&self) -> usize {
        match self {
            Region::Point(p) => p.len(),
            Region::Rect(r) => r.dims(),
        }
    }

    /// View this region as a rectangle, widening a point to a degenerate box.
    pub fn as_rect(&self) -> Rect {
        match self {
            Region::Point(p) => Rect::from_point(p),
            Region::Rect(r) => r.clone(),
        }
    }

    /// `true` for the `Point` variant.
    pub fn is_point(&self) -> bool {
        matches!(self, Region::Point(_))
    }
}
