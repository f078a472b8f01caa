//! Unit tests for ai-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ObstacleId, TaskId};

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(ObstacleId::INVALID.0, u32::MAX);
        assert_eq!(TaskId::INVALID.0, u64::MAX);
        assert!(!AgentId::default().is_valid());
        assert!(AgentId(3).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Rect, Vec2};

    #[test]
    fn normalized_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        let n = Vec2::new(3.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn square_range_is_per_axis() {
        let c = Vec2::new(0.0, 0.0);
        assert!(Vec2::new(149.0, 149.0).within_square(c, 150.0));
        assert!(!Vec2::new(151.0, 0.0).within_square(c, 150.0));
    }

    #[test]
    fn segment_distance_clamps_to_ends() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        assert!((Vec2::new(50.0, 10.0).distance_to_segment(a, b) - 10.0).abs() < 1e-4);
        assert!((Vec2::new(-30.0, 40.0).distance_to_segment(a, b) - 50.0).abs() < 1e-4);
        assert!((Vec2::new(5.0, 5.0).distance_to_segment(a, a) - 50f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn perp_is_orthogonal() {
        let d = Vec2::new(1.0, 0.0);
        assert_eq!(d.perp(), Vec2::new(0.0, 1.0));
        assert_eq!(d.perp().dot(d), 0.0);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 15.0)));
        assert!(!r.contains(Vec2::new(31.0, 12.0)));
    }
}

#[cfg(test)]
mod time {
    use crate::{AiError, Millis, SceneClock, SceneConfig};

    #[test]
    fn clock_carries_fractional_millis() {
        let mut clock = SceneClock::new(1.0);
        for _ in 0..4 {
            clock.advance(12.5);
        }
        assert_eq!(clock.tick, 4);
        assert_eq!(clock.now, Millis(50));
    }

    #[test]
    fn time_scale_pauses() {
        let mut clock = SceneClock::new(0.0);
        let d = clock.advance(16.0);
        assert_eq!(d, 0.0);
        assert_eq!(clock.now, Millis::ZERO);
        assert_eq!(clock.tick, 1);
    }

    #[test]
    fn night_is_second_half_of_cycle() {
        let cfg = SceneConfig { day_length_ms: 1000, ..SceneConfig::default() };
        assert!(!cfg.is_night_at(Millis(0)));
        assert!(!cfg.is_night_at(Millis(499)));
        assert!(cfg.is_night_at(Millis(500)));
        assert!(!cfg.is_night_at(Millis(1000)));

        let always_day = SceneConfig { day_length_ms: 0, ..SceneConfig::default() };
        assert!(!always_day.is_night_at(Millis(700)));
    }

    #[test]
    fn config_validation() {
        assert!(SceneConfig::default().validate().is_ok());
        let zero_tick = SceneConfig { tick_ms: 0.0, ..SceneConfig::default() };
        assert!(matches!(zero_tick.validate(), Err(AiError::Config(_))));
        let reversed = SceneConfig { time_scale: -1.0, ..SceneConfig::default() };
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn millis_since_saturates() {
        assert_eq!(Millis(10).since(Millis(4)), 6);
        assert_eq!(Millis(4).since(Millis(10)), 0);
    }
}

#[cfg(test)]
mod facing {
    use crate::{Facing, Vec2};

    #[test]
    fn dominant_axis_wins() {
        assert_eq!(Facing::from_velocity(Vec2::new(-5.0, 1.0), Facing::Down), Facing::Left);
        assert_eq!(Facing::from_velocity(Vec2::new(1.0, -5.0), Facing::Down), Facing::Up);
        assert_eq!(Facing::from_velocity(Vec2::new(0.0, 2.0), Facing::Up), Facing::Down);
    }

    #[test]
    fn zero_velocity_keeps_previous() {
        assert_eq!(Facing::from_velocity(Vec2::ZERO, Facing::Right), Facing::Right);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, Millis};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
        assert!(rng.chance(7.0));
    }

    #[test]
    fn millis_between_in_bounds() {
        let mut rng = AgentRng::new(9, AgentId(2));
        for _ in 0..500 {
            let m = rng.millis_between(300, 500);
            assert!(m >= Millis(300) && m <= Millis(500));
        }
        assert_eq!(rng.millis_between(40, 10), Millis(40));
    }
}
