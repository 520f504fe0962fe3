//! Unit tests for verse-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn equality_by_value() {
        assert_eq!(AgentId::new("car1"), AgentId::new("car1"));
        assert_ne!(AgentId::new("car1"), AgentId::new("car2"));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(AgentId::new("car1") < AgentId::new("car2"));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId::new("ego").to_string(), "ego");
    }
}

#[cfg(test)]
mod interval {
    use crate::interval::{Interval, Rect};

    #[test]
    fn overlap_and_contains() {
        let a = Interval::new(0.0, 10.0);
        let b = Interval::new(5.0, 15.0);
        assert!(a.overlaps(b));
        assert!(!a.contains(b));
        assert!(a.contains(Interval::new(2.0, 8.0)));
    }

    #[test]
    fn union_is_smallest_enclosing() {
        let a = Interval::new(0.0, 5.0);
        let b = Interval::new(3.0, 9.0);
        assert_eq!(a.union(b), Interval::new(0.0, 9.0));
    }

    #[test]
    fn add_sub_neg_are_sound() {
        let a = Interval::new(1.0, 2.0);
        let b = Interval::new(-1.0, 1.0);
        assert_eq!(a + b, Interval::new(0.0, 3.0));
        assert_eq!(a - b, Interval::new(0.0, 3.0));
        assert_eq!(-a, Interval::new(-2.0, -1.0));
    }

    #[test]
    fn mul_picks_extreme_products() {
        let a = Interval::new(-2.0, 3.0);
        let b = Interval::new(-1.0, 4.0);
        // candidates: 2, -8, -3, 12
        assert_eq!(a * b, Interval::new(-8.0, 12.0));
    }

    #[test]
    fn div_straddling_zero_is_conservative() {
        let a = Interval::new(1.0, 2.0);
        let straddles = Interval::new(-1.0, 1.0);
        let r = a / straddles;
        assert_eq!(r, Interval::new(f64::NEG_INFINITY, f64::INFINITY));
    }

    #[test]
    fn div_not_straddling_zero() {
        let a = Interval::new(4.0, 8.0);
        let b = Interval::new(2.0, 4.0);
        let r = a / b;
        assert_eq!(r, Interval::new(1.0, 4.0));
    }

    #[test]
    fn abs_handles_all_three_cases() {
        assert_eq!(Interval::new(2.0, 5.0).abs(), Interval::new(2.0, 5.0));
        assert_eq!(Interval::new(-5.0, -2.0).abs(), Interval::new(2.0, 5.0));
        assert_eq!(Interval::new(-3.0, 2.0).abs(), Interval::new(0.0, 3.0));
    }

    #[test]
    fn rect_contains_componentwise() {
        let outer = Rect::new(vec![Interval::new(0.0, 10.0), Interval::new(0.0, 10.0)]);
        let inner = Rect::new(vec![Interval::new(1.0, 2.0), Interval::new(3.0, 4.0)]);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn rect_union_is_componentwise() {
        let a = Rect::new(vec![Interval::new(0.0, 1.0), Interval::new(0.0, 1.0)]);
        let b = Rect::new(vec![Interval::new(2.0, 3.0), Interval::new(-1.0, 0.5)]);
        let u = a.union(&b);
        assert_eq!(u.0[0], Interval::new(0.0, 3.0));
        assert_eq!(u.0[1], Interval::new(-1.0, 1.0));
    }

    #[test]
    fn from_point_is_degenerate() {
        let r = Rect::from_point(&[1.0, 2.0, 3.0]);
        assert!(r.is_point());
        assert_eq!(r.as_point(), vec![1.0, 2.0, 3.0]);
    }
}

#[cfg(test)]
mod mode {
    use crate::mode::{Destination, ModeTuple, ModeValue};

    #[test]
    fn tuple_display() {
        let t = ModeTuple::new(vec![ModeValue::new("SwitchLeft"), ModeValue::new("Lane1")]);
        assert_eq!(t.to_string(), "(SwitchLeft, Lane1)");
    }

    #[test]
    fn destination_display() {
        let d = Destination::Mode(ModeTuple::new(vec![ModeValue::new("Normal")]));
        assert_eq!(d.to_string(), "(Normal)");
        assert_eq!(Destination::None.to_string(), "None");
    }
}

#[cfg(test)]
mod region {
    use crate::interval::{Interval, Rect};
    use crate::region::Region;

    #[test]
    fn point_widens_to_degenerate_rect() {
        let r = Region::Point(vec![1.0, 2.0]);
        assert!(r.is_point());
        assert_eq!(r.as_rect(), Rect::from_point(&[1.0, 2.0]));
    }

    #[test]
    fn rect_dims() {
        let r = Region::Rect(Rect::new(vec![Interval::new(0.0, 1.0); 3]));
        assert_eq!(r.dims(), 3);
        assert!(!r.is_point());
    }
}

#[cfg(test)]
mod step {
    use crate::step::{AnalysisConfig, HitRange, StepIndex};

    #[test]
    fn hit_range_extends() {
        let mut hr = HitRange::single(StepIndex(5));
        hr.extend(StepIndex(2));
        hr.extend(StepIndex(9));
        assert_eq!(hr.min, StepIndex(2));
        assert_eq!(hr.max, StepIndex(9));
    }

    #[test]
    fn total_steps_rounds_up() {
        let cfg = AnalysisConfig::new(10.0, 3.0);
        assert_eq!(cfg.total_steps(), 4);
    }
}

#[cfg(test)]
mod rng {
    use crate::ids::AgentId;
    use crate::interval::{Interval, Rect};
    use crate::rng::AgentRng;

    #[test]
    fn deterministic_same_seed() {
        let car1 = AgentId::new("car1");
        let mut r1 = AgentRng::new(12345, &car1);
        let mut r2 = AgentRng::new(12345, &car1);
        let rect = Rect::new(vec![Interval::new(0.0, 10.0), Interval::new(-5.0, 5.0)]);
        assert_eq!(r1.sample_rect(&rect), r2.sample_rect(&rect));
    }

    #[test]
    fn different_agents_diverge() {
        let mut r0 = AgentRng::new(1, &AgentId::new("car0"));
        let mut r1 = AgentRng::new(1, &AgentId::new("car1"));
        let rect = Rect::new(vec![Interval::new(0.0, 1_000_000.0)]);
        assert_ne!(r0.sample_rect(&rect), r1.sample_rect(&rect));
    }

    #[test]
    fn sample_rect_stays_in_bounds() {
        let mut rng = AgentRng::new(0, &AgentId::new("car1"));
        let rect = Rect::new(vec![Interval::new(-2.0, 2.0), Interval::new(10.0, 20.0)]);
        for _ in 0..1000 {
            let p = rng.sample_rect(&rect);
            assert!(rect.contains(&Rect::from_point(&p)));
        }
    }

    #[test]
    fn degenerate_dimension_is_exact() {
        let mut rng = AgentRng::new(0, &AgentId::new("car1"));
        let rect = Rect::new(vec![Interval::point(7.5)]);
        assert_eq!(rng.sample_rect(&rect), vec![7.5]);
    }
}
