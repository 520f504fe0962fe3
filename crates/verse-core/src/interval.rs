//! Closed interval and axis-aligned rectangle arithmetic.
//!
//! `Interval` carries the continuous-variable bounds used by verification
//! (`[low, high]`, both inclusive) and doubles as the scalar case
//! (`low == high`) so expression evaluation code doesn't need a separate
//! point/interval branch for arithmetic — only for the final boolean
//! decision (`evaluate_guard_disc` vs `evaluate_guard_cont` etc).
//!
//! Soundness requirement (§8 "Verification soundness" in the scenario
//! transition engine's testable properties): every operation here must
//! return a superset of the true range of the operation over all concrete
//! points in the operand intervals.  `f32` is not used — these sums
//! accumulate across several binary operations per guard evaluation and a
//! city-scale reach tube runs for hundreds of steps, so `f64` headroom
//! matters more here than in the teacher's `GeoPoint`.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// A closed interval `[low, high]`.  `low` may equal `high` (a point).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    /// Construct `[low, high]`.
    ///
    /// # Panics
    /// Panics in debug mode if `low > high`.
    #[inline]
    pub fn new(low: f64, high: f64) -> Self {
        debug_assert!(low <= high, "interval low ({low}) > high ({high})");
        Self { low, high }
    }

    /// A degenerate interval containing exactly `v`.
    #[inline]
    pub fn point(v: f64) -> Self {
        Self { low: v, high: v }
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.high - self.low
    }

    #[inline]
    pub fn midpoint(self) -> f64 {
        (self.low + self.high) * 0.5
    }

    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.low == self.high
    }

    /// `true` if `v` lies within `[low, high]`.
    #[inline]
    pub fn contains_value(self, v: f64) -> bool {
        self.low <= v && v <= self.high
    }

    /// `true` if `self` and `other` share at least one point.
    #[inline]
    pub fn overlaps(self, other: Interval) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// `true` if `other` is entirely inside `self` (both endpoints included).
    #[inline]
    pub fn contains(self, other: Interval) -> bool {
        self.low <= other.low && other.high <= self.high
    }

    /// Smallest interval containing both `self` and `other`.
    #[inline]
    pub fn union(self, other: Interval) -> Interval {
        Interval {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }

    /// Widen both bounds by `eps` (used for cache half-widths).
    #[inline]
    pub fn widen(self, eps: f64) -> Interval {
        Interval {
            low: self.low - eps,
            high: self.high + eps,
        }
    }

    /// Interval-arithmetic `min`: sound elementwise minimum.
    #[inline]
    pub fn min(self, other: Interval) -> Interval {
        Interval {
            low: self.low.min(other.low),
            high: self.high.min(other.high),
        }
    }

    /// Interval-arithmetic `max`: sound elementwise maximum.
    #[inline]
    pub fn max(self, other: Interval) -> Interval {
        Interval {
            low: self.low.max(other.low),
            high: self.high.max(other.high),
        }
    }

    #[inline]
    pub fn abs(self) -> Interval {
        if self.low >= 0.0 {
            self
        } else if self.high <= 0.0 {
            Interval::new(-self.high, -self.low)
        } else {
            Interval::new(0.0, self.low.abs().max(self.high.abs()))
        }
    }
}

impl Add for Interval {
    type Output = Interval;
    #[inline]
    fn add(self, rhs: Interval) -> Interval {
        Interval::new(self.low + rhs.low, self.high + rhs.high)
    }
}

impl Sub for Interval {
    type Output = Interval;
    #[inline]
    fn sub(self, rhs: Interval) -> Interval {
        Interval::new(self.low - rhs.high, self.high - rhs.low)
    }
}

impl Neg for Interval {
    type Output = Interval;
    #[inline]
    fn neg(self) -> Interval {
        Interval::new(-self.high, -self.low)
    }
}

impl Mul for Interval {
    type Output = Interval;
    fn mul(self, rhs: Interval) -> Interval {
        let candidates = [
            self.low * rhs.low,
            self.low * rhs.high,
            self.high * rhs.low,
            self.high * rhs.high,
        ];
        let low = candidates.iter().cloned().fold(f64::INFINITY, f64::min);
        let high = candidates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Interval::new(low, high)
    }
}

impl Div for Interval {
    type Output = Interval;
    /// Division by an interval straddling zero is unsound in general; since
    /// guard expressions never divide by a genuinely zero-width-at-zero
    /// denominator in practice, this returns the widest sound bound
    /// (±infinity) rather than panicking, so a pathological controller still
    /// produces a conservative (over-approximating) result.
    fn div(self, rhs: Interval) -> Interval {
        if rhs.low <= 0.0 && rhs.high >= 0.0 {
            return Interval::new(f64::NEG_INFINITY, f64::INFINITY);
        }
        let candidates = [
            self.low / rhs.low,
            self.low / rhs.high,
            self.high / rhs.low,
            self.high / rhs.high,
        ];
        let low = candidates.iter().cloned().fold(f64::INFINITY, f64::min);
        let high = candidates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Interval::new(low, high)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle: one `Interval` per continuous dimension, in the
/// agent's declared continuous-field order (§3 invariant i).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect(pub Vec<Interval>);

impl Rect {
    pub fn new(dims: Vec<Interval>) -> Self {
        Self(dims)
    }

    /// A degenerate rect wrapping a concrete point.
    pub fn from_point(values: &[f64]) -> Self {
        Self(values.iter().map(|&v| Interval::point(v)).collect())
    }

    pub fn dims(&self) -> usize {
        self.0.len()
    }

    /// `true` if every dimension of `other` is contained in the matching
    /// dimension of `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| a.contains(*b))
    }

    /// Componentwise union (§4.5 step 5: "unioned componentwise").
    ///
    /// # Panics
    /// Panics if `self` and `other` have a different number of dimensions.
    pub fn union(&self, other: &Rect) -> Rect {
        assert_eq!(self.0.len(), other.0.len(), "rect dimension mismatch in union");
        Rect(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| a.union(*b))
                .collect(),
        )
    }

    /// Midpoint of each dimension — used by the cache to rank candidate
    /// entries by proximity to a query rectangle's center.
    pub fn center(&self) -> Vec<f64> {
        self.0.iter().map(|i| i.midpoint()).collect()
    }

    /// `true` if every dimension has `low == high`.
    pub fn is_point(&self) -> bool {
        self.0.iter().all(|i| i.is_degenerate())
    }

    /// Collapse to a concrete point using each dimension's midpoint.
    /// Meaningless unless `is_point()`, but always well-defined.
    pub fn as_point(&self) -> Vec<f64> {
        self.0.iter().map(|i| i.midpoint()).collect()
    }
}
