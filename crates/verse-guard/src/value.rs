//! Evaluator values.

use verse_core::{Interval, ModeValue};
use verse_sensor::{DiscValue, MapValue};

/// A value produced by evaluating an expression. `Scalar` and `Interval`
/// both appear during evaluation — simulation binds only `Scalar`s,
/// verification binds `Interval`s, and arithmetic between the two widens to
/// `Interval`.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Scalar(f64),
    Interval(f64, f64),
    Mode(ModeValue),
    Bool(bool),
}

impl Value {
    /// View any numeric value as a closed interval (a `Scalar` becomes a
    /// degenerate one), so arithmetic has one code path.
    pub fn as_interval(&self) -> Option<Interval> {
        match self {
            Value::Scalar(v) => Some(Interval::point(*v)),
            Value::Interval(lo, hi) => Some(Interval::new(*lo, *hi)),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn from_interval(iv: Interval) -> Value {
        if iv.is_degenerate() {
            Value::Scalar(iv.low)
        } else {
            Value::Interval(iv.low, iv.high)
        }
    }
}

impl From<DiscValue> for Value {
    fn from(v: DiscValue) -> Self {
        match v {
            DiscValue::Mode(m) => Value::Mode(ModeValue::new(m)),
            DiscValue::Static(f) => Value::Scalar(f),
        }
    }
}

impl From<MapValue> for Value {
    fn from(v: MapValue) -> Self {
        match v {
            MapValue::Scalar(f) => Value::Scalar(f),
            MapValue::Mode(m) => Value::Mode(ModeValue::new(m)),
            MapValue::Bool(b) => Value::Bool(b),
        }
    }
}
