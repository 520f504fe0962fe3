//! Unit tests for `sense()`.

#[cfg(test)]
mod sense_tests {
    use std::sync::Arc;

    use verse_core::{Interval, ModeTuple, ModeValue, Rect, Region};
    use verse_ir::{build_agent, ArgKind, ControllerIrBuilder};

    use crate::sense::{sense, ContBinding, DiscBinding, DiscValue};
    use crate::snapshot::{AgentSnapshot, JointState};

    fn controller() -> Arc<verse_ir::ControllerIr> {
        Arc::new(
            ControllerIrBuilder::new()
                .mode_category("AgentMode", vec!["Normal", "SwitchLeft"])
                .continuous_fields(vec!["x", "y", "v"])
                .args(vec![ArgKind::Ego, ArgKind::Others, ArgKind::Map])
                .build(),
        )
    }

    #[test]
    fn ego_and_others_are_split_with_deterministic_order() {
        let ctrl = controller();
        let ego = build_agent(
            "car1",
            ctrl.clone(),
            Region::Point(vec![0.0, 0.0, 1.0]),
            ModeTuple::new(vec![ModeValue::new("Normal")]),
            vec![],
        )
        .unwrap();

        let mut joint = JointState::new();
        joint.insert(
            "car1".into(),
            AgentSnapshot::new(
                Region::Point(vec![0.0, 0.0, 1.0]),
                ModeTuple::new(vec![ModeValue::new("Normal")]),
                vec![],
            ),
        );
        joint.insert(
            "car2".into(),
            AgentSnapshot::new(
                Region::Point(vec![10.0, -0.3, 0.5]),
                ModeTuple::new(vec![ModeValue::new("Normal")]),
                vec![],
            ),
        );
        joint.insert(
            "car3".into(),
            AgentSnapshot::new(
                Region::Point(vec![25.0, 2.7, 0.5]),
                ModeTuple::new(vec![ModeValue::new("Normal")]),
                vec![],
            ),
        );

        let (cont, disc, lengths) = sense(&ego, &joint).unwrap();

        match cont.get("ego.x").unwrap() {
            ContBinding::Ego(iv) => assert_eq!(*iv, Interval::point(0.0)),
            _ => panic!("expected ego binding"),
        }
        match cont.get("others.x").unwrap() {
            ContBinding::Others(vs) => {
                assert_eq!(vs, &vec![Interval::point(10.0), Interval::point(25.0)]);
            }
            _ => panic!("expected others binding"),
        }
        assert_eq!(lengths["x"], 2);

        match disc.get("ego.AgentMode").unwrap() {
            DiscBinding::Ego(DiscValue::Mode(m)) => assert_eq!(m, "Normal"),
            _ => panic!("expected mode binding"),
        }
    }

    #[test]
    fn interval_states_flow_through_as_intervals() {
        let ctrl = controller();
        let ego = build_agent(
            "car1",
            ctrl,
            Region::Rect(Rect::new(vec![
                Interval::new(0.0, 0.01),
                Interval::new(-0.5, 0.5),
                Interval::point(1.0),
            ])),
            ModeTuple::new(vec![ModeValue::new("Normal")]),
            vec![],
        )
        .unwrap();

        let mut joint = JointState::new();
        joint.insert(
            "car1".into(),
            AgentSnapshot::new(
                Region::Rect(Rect::new(vec![
                    Interval::new(0.0, 0.01),
                    Interval::new(-0.5, 0.5),
                    Interval::point(1.0),
                ])),
                ModeTuple::new(vec![ModeValue::new("Normal")]),
                vec![],
            ),
        );

        let (cont, _, _) = sense(&ego, &joint).unwrap();
        match cont.get("ego.y").unwrap() {
            ContBinding::Ego(iv) => assert_eq!(*iv, Interval::new(-0.5, 0.5)),
            _ => panic!("expected ego binding"),
        }
    }

    #[test]
    fn missing_ego_row_is_an_error() {
        let ctrl = controller();
        let ego = build_agent(
            "car1",
            ctrl,
            Region::Point(vec![0.0, 0.0, 1.0]),
            ModeTuple::new(vec![ModeValue::new("Normal")]),
            vec![],
        )
        .unwrap();
        let joint = JointState::new();
        assert!(sense(&ego, &joint).is_err());
    }
}
