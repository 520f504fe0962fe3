use verse_core::{Interval, ModeTuple, ModeValue, Rect, Region};
use verse_guard::{Env, Value};
use verse_ir::{ControllerIrBuilder, Expr, ModePath};

use crate::apply::apply_reset;

fn mode(name: &str) -> ModeValue {
    ModeValue::new(name)
}

/// Concrete scenario 1 (§8): a single guard fires and assigns a single new
/// mode while leaving the continuous state to inherit untouched.
#[test]
fn single_reset_produces_one_successor_tuple() {
    let controller = ControllerIrBuilder::new()
        .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
        .continuous_fields(vec!["x", "y"])
        .build();

    let path = ModePath::new("AgentMode", Expr::BoolLit(true), Expr::ModeLit("SwitchLeft".into()));
    let env = Env::new();
    let current_mode = ModeTuple::new(vec![mode("Normal")]);
    let current_region = Region::Point(vec![1.0, 2.0]);

    let outcome = apply_reset(&controller, &[&path], &env, &current_mode, &current_region).unwrap();

    assert_eq!(outcome.dest_modes, vec![ModeTuple::new(vec![mode("SwitchLeft")])]);
    assert_eq!(outcome.successor_region, Region::Point(vec![1.0, 2.0]));
    assert!(!outcome.no_successor);
}

/// Concrete scenario 3 (§8): two independent reset paths assign
/// `mode := [SwitchLeft, SwitchRight]` and `track := [T0, T2]`, producing
/// the Cartesian product of four successor mode tuples.
#[test]
fn independent_nondeterministic_resets_cartesian_expand() {
    let controller = ControllerIrBuilder::new()
        .mode_category("AgentMode", vec!["Normal", "SwitchLeft", "SwitchRight"])
        .mode_category("TrackMode", vec!["T0", "T1", "T2"])
        .continuous_fields(vec!["x"])
        .build();

    let mode_path = ModePath::new(
        "AgentMode",
        Expr::BoolLit(true),
        Expr::List(vec![Expr::ModeLit("SwitchLeft".into()), Expr::ModeLit("SwitchRight".into())]),
    );
    let track_path = ModePath::new(
        "TrackMode",
        Expr::BoolLit(true),
        Expr::List(vec![Expr::ModeLit("T0".into()), Expr::ModeLit("T2".into())]),
    );

    let env = Env::new();
    let current_mode = ModeTuple::new(vec![mode("Normal"), mode("T1")]);
    let current_region = Region::Point(vec![0.0]);

    let outcome = apply_reset(
        &controller,
        &[&mode_path, &track_path],
        &env,
        &current_mode,
        &current_region,
    )
    .unwrap();

    assert_eq!(outcome.dest_modes.len(), 4);
    let expected = [
        ("SwitchLeft", "T0"),
        ("SwitchLeft", "T2"),
        ("SwitchRight", "T0"),
        ("SwitchRight", "T2"),
    ];
    for (agent_mode, track_mode) in expected {
        let tuple = ModeTuple::new(vec![mode(agent_mode), mode(track_mode)]);
        assert!(outcome.dest_modes.contains(&tuple), "missing {agent_mode}/{track_mode}");
    }
    assert!(!outcome.no_successor);
}

/// Concrete scenario 4 (§8): a reset's discrete value set is empty, so no
/// concrete successor mode exists even though the continuous reset (a
/// stopped velocity) still applies.
#[test]
fn empty_candidate_list_yields_no_successor_sentinel() {
    let controller = ControllerIrBuilder::new()
        .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
        .continuous_fields(vec!["v"])
        .build();

    let mode_path = ModePath::new("AgentMode", Expr::BoolLit(true), Expr::List(vec![]));
    let velocity_path = ModePath::new("v", Expr::BoolLit(true), Expr::Lit(0.0));

    let env = Env::new();
    let current_mode = ModeTuple::new(vec![mode("Normal")]);
    let current_region = Region::Point(vec![5.0]);

    let outcome = apply_reset(
        &controller,
        &[&mode_path, &velocity_path],
        &env,
        &current_mode,
        &current_region,
    )
    .unwrap();

    assert!(outcome.no_successor);
    assert!(outcome.dest_modes.is_empty());
    assert_eq!(outcome.successor_region, Region::Point(vec![0.0]));
}

#[test]
fn untouched_mode_category_inherits_current_value() {
    let controller = ControllerIrBuilder::new()
        .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
        .mode_category("TrackMode", vec!["T0", "T1"])
        .continuous_fields(vec!["x"])
        .build();

    let path = ModePath::new("AgentMode", Expr::BoolLit(true), Expr::ModeLit("SwitchLeft".into()));
    let env = Env::new();
    let current_mode = ModeTuple::new(vec![mode("Normal"), mode("T1")]);
    let current_region = Region::Point(vec![0.0]);

    let outcome = apply_reset(&controller, &[&path], &env, &current_mode, &current_region).unwrap();

    assert_eq!(outcome.dest_modes, vec![ModeTuple::new(vec![mode("SwitchLeft"), mode("T1")])]);
}

#[test]
fn continuous_reset_replaces_only_its_dimension() {
    let controller = ControllerIrBuilder::new()
        .mode_category("AgentMode", vec!["Normal"])
        .continuous_fields(vec!["x", "y"])
        .build();

    let path = ModePath::new("y", Expr::BoolLit(true), Expr::Lit(9.0));
    let mut env = Env::new();
    env.bind("const", Value::Scalar(9.0));
    let current_mode = ModeTuple::new(vec![mode("Normal")]);
    let current_region = Region::Rect(Rect::new(vec![Interval::new(0.0, 1.0), Interval::new(2.0, 3.0)]));

    let outcome = apply_reset(&controller, &[&path], &env, &current_mode, &current_region).unwrap();

    match outcome.successor_region {
        Region::Rect(r) => {
            assert_eq!(r.0[0], Interval::new(0.0, 1.0));
            assert_eq!(r.0[1], Interval::point(9.0));
        }
        Region::Point(_) => panic!("expected a rect, verification resets preserve interval-ness"),
    }
}

#[test]
fn unknown_target_variable_is_rejected() {
    let controller = ControllerIrBuilder::new()
        .mode_category("AgentMode", vec!["Normal"])
        .continuous_fields(vec!["x"])
        .build();

    let path = ModePath::new("not_declared", Expr::BoolLit(true), Expr::Lit(1.0));
    let env = Env::new();
    let current_mode = ModeTuple::new(vec![mode("Normal")]);
    let current_region = Region::Point(vec![0.0]);

    let result = apply_reset(&controller, &[&path], &env, &current_mode, &current_region);
    assert!(result.is_err());
}

#[test]
fn nondeterministic_continuous_reset_is_rejected() {
    let controller = ControllerIrBuilder::new()
        .mode_category("AgentMode", vec!["Normal"])
        .continuous_fields(vec!["x"])
        .build();

    let path = ModePath::new(
        "x",
        Expr::BoolLit(true),
        Expr::List(vec![Expr::Lit(1.0), Expr::Lit(2.0)]),
    );
    let env = Env::new();
    let current_mode = ModeTuple::new(vec![mode("Normal")]);
    let current_region = Region::Point(vec![0.0]);

    let result = apply_reset(&controller, &[&path], &env, &current_mode, &current_region);
    assert!(result.is_err());
}
