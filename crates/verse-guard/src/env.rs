//! The packed environment a single evaluation binds against (§3
//! "Environment binding").

use rustc_hash::FxHashMap;

use crate::value::Value;

/// A flat `dotted-name -> Value` binding table, plus the `others.<field>`
/// list-length table quantifier unrolling needs (§4.2.1).
///
/// Built fresh per time index and discarded (§3 lifecycle); cheap to
/// construct since it's just two hash maps.
#[derive(Clone, Debug, Default)]
pub struct Env {
    vars: FxHashMap<String, Value>,
    others_len: FxHashMap<String, usize>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn set_others_len(&mut self, field: impl Into<String>, len: usize) {
        self.others_len.insert(field.into(), len);
    }

    /// Length of the `others.<field>` list, if `field` was sensed at all.
    pub fn others_len(&self, field: &str) -> Option<usize> {
        self.others_len.get(field).copied()
    }
}
