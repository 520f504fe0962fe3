//! Unit tests for the guard evaluator.

#[cfg(test)]
mod tri_eval {
    use verse_core::ModeValue;
    use verse_ir::{BinOp, BoolOp, Expr, QuantKind};

    use crate::env::Env;
    use crate::eval::{evaluate_guard_cont, evaluate_guard_disc, evaluate_guard_hybrid, evaluate_point};
    use crate::value::Value;

    fn quantified_guard() -> Expr {
        // forall o in others. o.x - ego.x < 5
        Expr::Quantifier {
            kind: QuantKind::ForAll,
            bound: "other".into(),
            body: Box::new(Expr::bin(
                BinOp::Lt,
                Expr::bin(BinOp::Sub, Expr::var("other.x"), Expr::var("ego.x")),
                Expr::lit(5.0),
            )),
        }
    }

    #[test]
    fn point_evaluation_matches_concrete_scenario() {
        // scenario 1 (§8): ego.x = 0, one other at x = 10 -> 10 - 0 < 5 is false.
        let mut env = Env::new();
        env.bind("ego.x", Value::Scalar(0.0));
        env.set_others_len("x", 1);
        env.bind("others.x[0]", Value::Scalar(10.0));
        assert!(!evaluate_point(&[quantified_guard()], &env).unwrap());

        // once the other agent is close enough, the guard fires.
        let mut env2 = Env::new();
        env2.bind("ego.x", Value::Scalar(1.0));
        env2.set_others_len("x", 1);
        env2.bind("others.x[0]", Value::Scalar(4.5));
        assert!(evaluate_point(&[quantified_guard()], &env2).unwrap());
    }

    #[test]
    fn discrete_pruning_ignores_unbound_continuous_vars() {
        let mut env = Env::new();
        env.bind("ego.AgentMode", Value::Mode(ModeValue::new("Normal")));
        // others_len is registered (one other agent exists) but its x value
        // is deliberately left unbound, as discrete pruning never sees it.
        env.set_others_len("x", 1);
        assert!(evaluate_guard_disc(&[quantified_guard()], &env).unwrap());
    }

    #[test]
    fn discrete_pruning_detects_definite_mode_mismatch() {
        let guard = Expr::bin(
            BinOp::Eq,
            Expr::var("ego.AgentMode"),
            Expr::ModeLit("SwitchLeft".into()),
        );
        let mut env = Env::new();
        env.bind("ego.AgentMode", Value::Mode(ModeValue::new("Normal")));
        assert!(!evaluate_guard_disc(&[guard], &env).unwrap());
    }

    #[test]
    fn hybrid_pruning_false_only_when_unsatisfiable() {
        let mut env = Env::new();
        env.bind("ego.x", Value::Interval(0.0, 0.01));
        env.set_others_len("x", 1);
        // other.x in [10, 10] => other.x - ego.x in [9.99, 10], never < 5.
        env.bind("others.x[0]", Value::Interval(10.0, 10.0));
        assert!(!evaluate_guard_hybrid(&[quantified_guard()], &env).unwrap());

        let mut env2 = Env::new();
        env2.bind("ego.x", Value::Interval(0.0, 0.01));
        env2.set_others_len("x", 1);
        env2.bind("others.x[0]", Value::Interval(1.0, 2.0));
        assert!(evaluate_guard_hybrid(&[quantified_guard()], &env2).unwrap());
    }

    #[test]
    fn containment_reports_hit_and_contained_separately() {
        let guard = Expr::bin(BinOp::Lt, Expr::var("ego.x"), Expr::lit(5.0));

        // box straddles the boundary: hit but not contained.
        let mut straddling = Env::new();
        straddling.bind("ego.x", Value::Interval(4.0, 6.0));
        let (hit, contained) = evaluate_guard_cont(&[guard.clone()], &straddling).unwrap();
        assert!(hit);
        assert!(!contained);

        // box entirely below the boundary: hit and contained.
        let mut inside = Env::new();
        inside.bind("ego.x", Value::Interval(1.0, 2.0));
        let (hit, contained) = evaluate_guard_cont(&[guard], &inside).unwrap();
        assert!(hit);
        assert!(contained);
    }

    #[test]
    fn bool_and_or_not_combine_correctly() {
        let g = Expr::Bool(
            BoolOp::And,
            vec![
                Expr::bin(BinOp::Lt, Expr::var("ego.x"), Expr::lit(10.0)),
                Expr::Bool(BoolOp::Not, vec![Expr::bin(BinOp::Gt, Expr::var("ego.v"), Expr::lit(5.0))]),
            ],
        );
        let mut env = Env::new();
        env.bind("ego.x", Value::Scalar(1.0));
        env.bind("ego.v", Value::Scalar(1.0));
        assert!(evaluate_point(&[g], &env).unwrap());
    }

    #[test]
    fn point_evaluation_errors_on_unbound_variable() {
        let guard = Expr::bin(BinOp::Lt, Expr::var("ego.missing"), Expr::lit(1.0));
        let env = Env::new();
        assert!(evaluate_point(&[guard], &env).is_err());
    }

    #[test]
    fn empty_guard_list_is_an_error() {
        let env = Env::new();
        assert!(evaluate_point(&[], &env).is_err());
    }
}

#[cfg(test)]
mod functions {
    use crate::functions::call_fn;
    use crate::value::Value;

    #[test]
    fn min_max_abs_are_sound_over_intervals() {
        let a = Value::Interval(-2.0, 3.0);
        let b = Value::Interval(0.0, 1.0);
        assert_eq!(call_fn("min", &[a.clone(), b.clone()]).unwrap(), Value::Interval(-2.0, 1.0));
        assert_eq!(call_fn("max", &[a.clone(), b]).unwrap(), Value::Interval(0.0, 3.0));
        assert_eq!(call_fn("abs", &[a]).unwrap(), Value::Interval(0.0, 3.0));
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert!(call_fn("tan", &[Value::Scalar(1.0)]).is_err());
    }

    #[test]
    fn trig_rejects_interval_arguments() {
        assert!(call_fn("sin", &[Value::Interval(0.0, 1.0)]).is_err());
        assert!(call_fn("sin", &[Value::Scalar(0.0)]).is_ok());
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        assert!(call_fn("min", &[Value::Scalar(1.0)]).is_err());
    }
}

#[cfg(test)]
mod updater_tests {
    use verse_core::Interval;
    use verse_ir::{BinOp, Expr, QuantKind};
    use verse_sensor::{ContBinding, ContTemplate, DiscBindings};

    use crate::env::Env;
    use crate::updater::{apply_updater, parse_any_all};

    #[test]
    fn parse_any_all_generates_one_entry_per_other() {
        let guard = Expr::Quantifier {
            kind: QuantKind::ForAll,
            bound: "other".into(),
            body: Box::new(Expr::bin(BinOp::Lt, Expr::var("other.x"), Expr::lit(5.0))),
        };
        let mut env = Env::new();
        env.set_others_len("x", 3);
        let updater = parse_any_all(&guard, &env);
        assert_eq!(updater.get("x").unwrap().len(), 3);
    }

    #[test]
    fn apply_updater_binds_from_cont_template() {
        let guard = Expr::Quantifier {
            kind: QuantKind::ForAll,
            bound: "other".into(),
            body: Box::new(Expr::bin(BinOp::Lt, Expr::var("other.x"), Expr::lit(5.0))),
        };
        let mut env = Env::new();
        env.set_others_len("x", 2);
        let updater = parse_any_all(&guard, &env);

        let mut cont = ContTemplate::new();
        cont.insert(
            "others.x".to_string(),
            ContBinding::Others(vec![Interval::point(1.0), Interval::point(2.0)]),
        );
        let disc = DiscBindings::new();
        apply_updater(&mut env, &updater, &cont, &disc);

        assert_eq!(env.get("others.x[0]"), Some(&crate::value::Value::Scalar(1.0)));
        assert_eq!(env.get("others.x[1]"), Some(&crate::value::Value::Scalar(2.0)));
    }
}
