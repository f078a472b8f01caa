//! Unit tests for ai-agent.

use std::sync::Arc;

use ai_core::{AgentId, Facing, Vec2};

use crate::{AnimationLibrary, Animator, Body, PathFollower};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn body_at(x: f32, y: f32) -> Body {
    Body::new(AgentId(0), Vec2::new(x, y), 100.0)
}

// ── Body ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod body {
    use super::*;

    #[test]
    fn integrate_moves_by_velocity_per_second() {
        let mut b = body_at(0.0, 0.0);
        b.velocity = Vec2::new(-100.0, 20.0);
        b.integrate(500.0);
        assert_eq!(b.position, Vec2::new(-50.0, 10.0));
        assert_eq!(b.facing, Facing::Left);
    }

    #[test]
    fn stopping_keeps_facing() {
        let mut b = body_at(0.0, 0.0);
        b.velocity = Vec2::new(0.0, -30.0);
        b.integrate(16.0);
        b.stop();
        b.integrate(16.0);
        assert_eq!(b.facing, Facing::Up);
    }
}

// ── Vitals ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vitals {
    use crate::{DamageOutcome, Vitals};

    #[test]
    fn damage_clamps_and_kills_once() {
        let mut v = Vitals::new(30);
        assert_eq!(v.take_damage(10), DamageOutcome::Hurt);
        assert_eq!(v.take_damage(100), DamageOutcome::Killed);
        assert_eq!(v.hit_points(), 0);
        assert!(v.is_dead());
        assert_eq!(v.take_damage(5), DamageOutcome::Ignored);
    }

    #[test]
    fn heal_caps_at_max_and_skips_dead() {
        let mut v = Vitals::new(30);
        v.take_damage(5);
        v.heal(50);
        assert_eq!(v.hit_points(), 30);
        v.take_damage(30);
        v.heal(10);
        assert!(v.is_dead());
        v.restore();
        assert_eq!(v.hit_points(), 30);
    }

    #[test]
    fn set_clamps_to_new_max() {
        let mut v = Vitals::new(30);
        v.set(80, 50);
        assert_eq!((v.hit_points(), v.max_hit_points()), (50, 50));
    }
}

// ── NightStats ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod night {
    use crate::NightStats;

    #[test]
    fn enabling_twice_is_idempotent() {
        let mut n = NightStats::new(1.25, 1.5);
        assert!(n.set_night(true));
        let (speed, attack) = (n.speed(80.0), n.attack(10));
        assert!(!n.set_night(true));
        assert_eq!((n.speed(80.0), n.attack(10)), (speed, attack));
        assert_eq!((speed, attack), (100.0, 15));
    }

    #[test]
    fn disabling_restores_base() {
        let mut n = NightStats::default();
        n.set_night(true);
        assert!(n.set_night(false));
        assert!(!n.set_night(false));
        assert_eq!(n.speed(80.0), 80.0);
        assert_eq!(n.attack(10), 10);
        assert!(!n.is_applied());
    }
}

// ── PathFollower ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_follower {
    use super::*;

    #[test]
    fn empty_path_returns_false_without_touching_velocity() {
        let mut f = PathFollower::new(15.0);
        let mut b = body_at(0.0, 0.0);
        b.velocity = Vec2::new(3.0, 4.0);
        assert!(!f.move_to_waypoint(&mut b, 50.0));
        assert_eq!(b.velocity, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn steers_towards_unreached_waypoint() {
        let mut f = PathFollower::new(15.0);
        f.set_path(vec![Vec2::new(100.0, 0.0)]);
        let mut b = body_at(0.0, 0.0);
        assert!(f.move_to_waypoint(&mut b, 50.0));
        assert_eq!(b.velocity, Vec2::new(50.0, 0.0));
        assert_eq!(f.index(), 0);
    }

    #[test]
    fn advances_once_per_reach_and_never_back() {
        let mut f = PathFollower::new(15.0);
        f.set_path(vec![Vec2::new(10.0, 0.0), Vec2::new(200.0, 0.0)]);
        let mut b = body_at(0.0, 0.0);

        assert!(f.move_to_waypoint(&mut b, 50.0));
        assert_eq!(f.index(), 1);
        // Still near the first waypoint; index must not move again or back.
        assert!(f.move_to_waypoint(&mut b, 50.0));
        assert_eq!(f.index(), 1);

        b.position = Vec2::new(195.0, 0.0);
        assert!(!f.move_to_waypoint(&mut b, 50.0));
        assert_eq!(f.index(), 2);
        assert!(f.is_exhausted());

        let before = b.velocity;
        assert!(!f.move_to_waypoint(&mut b, 50.0));
        assert_eq!(b.velocity, before);
        assert_eq!(f.index(), 2);
    }

    #[test]
    fn staleness_compares_target_with_final_waypoint() {
        let mut f = PathFollower::new(15.0);
        assert!(f.is_stale(Vec2::ZERO, 50.0));
        f.set_path(vec![Vec2::new(50.0, 50.0), Vec2::new(200.0, 0.0)]);
        assert!(!f.is_stale(Vec2::new(240.0, 0.0), 50.0));
        assert!(f.is_stale(Vec2::new(260.0, 0.0), 50.0));
    }

    #[test]
    fn detour_route_is_measured_against_its_goal() {
        let mut f = PathFollower::new(15.0);
        f.set_route(vec![Vec2::new(100.0, 45.0)], Vec2::new(200.0, 0.0));
        assert_eq!(f.final_waypoint(), Some(Vec2::new(100.0, 45.0)));
        assert!(!f.is_stale(Vec2::new(210.0, 0.0), 50.0));
        f.clear();
        assert!(f.is_stale(Vec2::new(210.0, 0.0), 50.0));
    }
}

// ── Animator ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod animator {
    use super::*;

    fn animator() -> Animator {
        Animator::new(Arc::new(AnimationLibrary::new(["walk_left", "idle", "death"])))
    }

    #[test]
    fn prefers_directional_name() {
        let mut a = animator();
        assert!(a.play_facing(AgentId(1), "walk", Facing::Left));
        assert_eq!(a.current(), Some("walk_left"));
    }

    #[test]
    fn falls_back_to_bare_action() {
        let mut a = animator();
        assert!(a.play_facing(AgentId(1), "idle", Facing::Up));
        assert_eq!(a.current(), Some("idle"));
    }

    #[test]
    fn missing_name_keeps_current() {
        let mut a = animator();
        a.play(AgentId(1), "death");
        assert!(!a.play_facing(AgentId(1), "swim", Facing::Down));
        assert_eq!(a.current(), Some("death"));
    }

    #[test]
    fn accept_all_library_plays_anything() {
        let mut a = Animator::new(Arc::new(AnimationLibrary::accept_all()));
        assert!(a.play_facing(AgentId(1), "fade", Facing::Right));
        assert_eq!(a.current(), Some("fade_right"));
    }
}

// ── Outbox ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod outbox {
    use super::*;
    use crate::{GameEvent, Outbox, SoundCue};

    #[test]
    fn drain_empties_in_order() {
        let mut o = Outbox::default();
        o.push(GameEvent::Died { agent: AgentId(2) });
        o.sound(AgentId(2), SoundCue::Death);
        let events = o.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::Died { agent: AgentId(2) });
        assert!(o.is_empty());
    }
}
