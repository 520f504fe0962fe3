use std::sync::Arc;

use verse_core::{Destination, ModeTuple, ModeValue};
use verse_ir::{build_agent, BinOp, BoolOp, ControllerIrBuilder, Expr, ModePath, QuantKind};

use crate::node::{NodeAgent, NodeView, TraceRow};
use crate::sensor::DefaultSensor;
use crate::sim::get_transition_simulate;
use crate::transition::{SimOutcome, VerifyOutcome};
use crate::verify::get_transition_verify;

fn mode(name: &str) -> ModeValue {
    ModeValue::new(name)
}

fn lane_change_controller() -> Arc<verse_ir::ControllerIr> {
    // `forall o in others. o.x - ego.x < 5` => SwitchLeft with `ego.y := ego.y + 3`.
    let guard = Expr::Quantifier {
        kind: QuantKind::ForAll,
        bound: "o".to_string(),
        body: Box::new(Expr::bin(
            BinOp::Lt,
            Expr::bin(BinOp::Sub, Expr::var("o.x"), Expr::var("ego.x")),
            Expr::lit(5.0),
        )),
    };
    let mode_reset = ModePath::new("AgentMode", guard.clone(), Expr::ModeLit("SwitchLeft".into()));
    let y_reset = ModePath::new("y", guard, Expr::bin(BinOp::Add, Expr::var("ego.y"), Expr::lit(3.0)));

    Arc::new(
        ControllerIrBuilder::new()
            .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
            .mode_category("TrackMode", vec!["T1", "T2"])
            .continuous_fields(vec!["x", "y", "v"])
            .paths(vec![mode_reset, y_reset])
            .build(),
    )
}

fn npc_controller() -> Arc<verse_ir::ControllerIr> {
    Arc::new(
        ControllerIrBuilder::new()
            .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
            .mode_category("TrackMode", vec!["T1", "T2"])
            .continuous_fields(vec!["x", "y", "v"])
            .build(),
    )
}

fn row(t: f64, x: f64, y: f64, v: f64) -> TraceRow {
    TraceRow(vec![t, x, y, v])
}

/// Concrete scenario 1 (§8): a two-agent approach triggers exactly one
/// transition at the first index where the quantified gap guard holds.
#[test]
fn single_transition_at_earliest_feasible_index() {
    let controller = lane_change_controller();
    let npc = npc_controller();

    let a = build_agent(
        "A",
        controller,
        verse_core::Region::Point(vec![0.0, 0.0, 1.0]),
        ModeTuple::new(vec![mode("Normal"), mode("T1")]),
        Vec::new(),
    )
    .unwrap();
    let b = build_agent(
        "B",
        npc,
        verse_core::Region::Point(vec![10.0, 0.0, 0.5]),
        ModeTuple::new(vec![mode("Normal"), mode("T1")]),
        Vec::new(),
    )
    .unwrap();

    let mut node = NodeView::new();
    node.push(NodeAgent {
        agent: Arc::new(a.clone()),
        mode: a.init_mode.clone(),
        static_data: Vec::new(),
        trace: vec![
            row(0.0, 0.0, 0.0, 1.0),
            row(0.05, 0.0, 0.0, 1.0),
            row(0.10, 0.0, 0.0, 1.0),
        ],
    });
    node.push(NodeAgent {
        agent: Arc::new(b.clone()),
        mode: b.init_mode.clone(),
        static_data: Vec::new(),
        // Gap A->B starts at 10 (no fire), drops to 4 at idx 1 (fires).
        trace: vec![row(0.0, 10.0, 0.0, 0.5), row(0.05, 4.0, 0.0, 0.5), row(0.10, 3.0, 0.0, 0.5)],
    });

    let outcome = get_transition_simulate(&node, &DefaultSensor).unwrap();
    match outcome {
        SimOutcome::Transitioned { transitions, at } => {
            assert_eq!(at.0, 1);
            assert_eq!(transitions.len(), 1);
            let t = &transitions[0];
            assert_eq!(t.agent_id.as_str(), "A");
            assert_eq!(t.dst_mode, Destination::Mode(ModeTuple::new(vec![mode("SwitchLeft"), mode("T1")])));
            assert_eq!(t.successor_point, vec![0.0, 3.0, 1.0]);
        }
        other => panic!("expected a transition at idx 1, got {other:?}"),
    }
}

/// Concrete scenario 2 (§8): an assert firing preempts a guard that would
/// also fire at the same index.
#[test]
fn assert_violation_preempts_guard() {
    let guard = Expr::bin(BinOp::Gt, Expr::var("ego.x"), Expr::lit(0.5));
    let assert = verse_ir::Assert::new(Vec::new(), Expr::bin(BinOp::Gt, Expr::var("ego.v"), Expr::lit(0.0)), None);

    let controller = Arc::new(
        ControllerIrBuilder::new()
            .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
            .continuous_fields(vec!["x", "v"])
            .path(ModePath::new("AgentMode", guard, Expr::ModeLit("SwitchLeft".into())))
            .assert(assert)
            .build(),
    );

    let a = build_agent(
        "A",
        controller,
        verse_core::Region::Point(vec![0.0, 1.0]),
        ModeTuple::new(vec![mode("Normal")]),
        Vec::new(),
    )
    .unwrap();

    let mut node = NodeView::new();
    node.push(NodeAgent {
        agent: Arc::new(a.clone()),
        mode: a.init_mode.clone(),
        static_data: Vec::new(),
        trace: vec![row(0.0, 0.0, 1.0, 0.0), row(0.05, 1.0, 0.0, 0.0)],
    });

    let outcome = get_transition_simulate(&node, &DefaultSensor).unwrap();
    match outcome {
        SimOutcome::AssertsFired { hits, at } => {
            assert_eq!(at.0, 1);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].agent, verse_core::AgentId::new("A"));
        }
        other => panic!("expected the assert to preempt any transition, got {other:?}"),
    }
}

/// Concrete scenario 5 (§8): containment forces the verification loop to
/// stop the moment the interval box is entirely inside the guard region.
#[test]
fn containment_cuts_the_verification_loop_short() {
    // `ego.x > 0` is definitely true (contained) once the whole interval
    // sits above zero; it only ever "hits" while the box straddles zero.
    let guard = Expr::bin(BinOp::Gt, Expr::var("ego.x"), Expr::lit(0.0));
    let controller = Arc::new(
        ControllerIrBuilder::new()
            .mode_category("AgentMode", vec!["Normal", "Past"])
            .continuous_fields(vec!["x"])
            .path(ModePath::new("AgentMode", guard, Expr::ModeLit("Past".into())))
            .build(),
    );

    let a = build_agent(
        "A",
        controller,
        verse_core::Region::Rect(verse_core::Rect::new(vec![verse_core::Interval::new(-2.0, -1.0)])),
        ModeTuple::new(vec![mode("Normal")]),
        Vec::new(),
    )
    .unwrap();

    let mut node = NodeView::new();
    // idx 0: [-2, -1] entirely non-positive -> definite miss.
    // idx 1: [0.5, 1.5] entirely positive -> hit AND contained, so the loop
    // stops here; idx 2 would also be entirely positive but is never
    // reached.
    node.push(NodeAgent {
        agent: Arc::new(a.clone()),
        mode: a.init_mode.clone(),
        static_data: Vec::new(),
        trace: vec![
            row(0.0, -2.0, 0.0, 0.0),
            row(0.0, -1.0, 0.0, 0.0),
            row(0.05, 0.5, 0.0, 0.0),
            row(0.05, 1.5, 0.0, 0.0),
            row(0.10, 2.0, 0.0, 0.0),
            row(0.10, 3.0, 0.0, 0.0),
        ],
    });

    let outcome = get_transition_verify(&node, &DefaultSensor).unwrap();
    match outcome {
        VerifyOutcome::Transitioned { transitions } => {
            assert_eq!(transitions.len(), 1);
            assert_eq!(transitions[0].hit_range.min.0, 1);
            assert_eq!(transitions[0].hit_range.max.0, 1);
        }
        other => panic!("expected exactly one transition, got {other:?}"),
    }
}

/// §7's interval analogue of `assert_violation_preempts_guard`: a
/// possibly-violated assert fires during verification too, preempting
/// whatever hits the guard scan would otherwise report for that step.
#[test]
fn assert_violation_preempts_guard_during_verification() {
    let guard = Expr::bin(BinOp::Gt, Expr::var("ego.x"), Expr::lit(0.5));
    let assert = verse_ir::Assert::new(Vec::new(), Expr::bin(BinOp::Gt, Expr::var("ego.v"), Expr::lit(0.0)), None);

    let controller = Arc::new(
        ControllerIrBuilder::new()
            .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
            .continuous_fields(vec!["x", "v"])
            .path(ModePath::new("AgentMode", guard, Expr::ModeLit("SwitchLeft".into())))
            .assert(assert)
            .build(),
    );

    let a = build_agent(
        "A",
        controller,
        verse_core::Region::Point(vec![0.0, 1.0]),
        ModeTuple::new(vec![mode("Normal")]),
        Vec::new(),
    )
    .unwrap();

    let mut node = NodeView::new();
    node.push(NodeAgent {
        agent: Arc::new(a.clone()),
        mode: a.init_mode.clone(),
        static_data: Vec::new(),
        // idx 0: v is exactly 0 at both bounds, so `ego.v > 0` is definitely
        // false everywhere in the box and the assert fires immediately,
        // before the (here unsatisfiable) guard is ever scanned.
        trace: vec![
            row(0.0, 0.0, 1.0, 0.0),
            row(0.0, 0.0, 1.0, 0.0),
            row(0.05, 1.0, 1.0, 0.0),
            row(0.05, 1.0, 1.0, 0.0),
        ],
    });

    let outcome = get_transition_verify(&node, &DefaultSensor).unwrap();
    match outcome {
        VerifyOutcome::AssertsFired { hits, at } => {
            assert_eq!(at.0, 0);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].agent, verse_core::AgentId::new("A"));
        }
        other => panic!("expected the assert to preempt any transition, got {other:?}"),
    }
}

/// A guard that never holds produces no transitions over the whole trace.
#[test]
fn no_transition_when_guard_never_fires() {
    let guard = Expr::Bool(BoolOp::And, vec![Expr::bin(BinOp::Lt, Expr::var("ego.x"), Expr::lit(-100.0))]);
    let controller = Arc::new(
        ControllerIrBuilder::new()
            .mode_category("AgentMode", vec!["Normal", "Other"])
            .continuous_fields(vec!["x"])
            .path(ModePath::new("AgentMode", guard, Expr::ModeLit("Other".into())))
            .build(),
    );
    let a = build_agent(
        "A",
        controller,
        verse_core::Region::Point(vec![0.0]),
        ModeTuple::new(vec![mode("Normal")]),
        Vec::new(),
    )
    .unwrap();

    let mut node = NodeView::new();
    node.push(NodeAgent {
        agent: Arc::new(a.clone()),
        mode: a.init_mode.clone(),
        static_data: Vec::new(),
        trace: vec![row(0.0, 0.0, 0.0, 0.0), row(0.05, 1.0, 0.0, 0.0)],
    });

    let outcome = get_transition_simulate(&node, &DefaultSensor).unwrap();
    assert_eq!(outcome, SimOutcome::NoTransition);
}
