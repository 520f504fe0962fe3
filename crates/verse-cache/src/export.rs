//! JSON export (§6 "analysis trees may be serialized as JSON").
//!
//! Generic over any `Serialize` value rather than naming a concrete tree
//! type: `verse-engine` owns `AnalysisTree` and depends on this crate, so an
//! export function that named it here would make the dependency circular.
//! `verse-engine` calls `to_json(&tree)` with its own type instead.

use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Point {
        x: f64,
        y: f64,
    }

    #[test]
    fn to_json_serializes_a_plain_struct() {
        let p = Point { x: 1.0, y: 2.5 };
        let s = to_json(&p).unwrap();
        assert_eq!(s, r#"{"x":1.0,"y":2.5}"#);
    }

    #[test]
    fn to_json_pretty_is_multiline() {
        let p = Point { x: 1.0, y: 2.5 };
        let s = to_json_pretty(&p).unwrap();
        assert!(s.contains('\n'));
    }
}
