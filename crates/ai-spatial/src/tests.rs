//! Unit tests for ai-spatial.

use ai_core::{ObstacleId, Vec2};

use crate::{DetourPathfinder, Obstacle, ObstacleSet, Pathfinder, PathfinderConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config() -> PathfinderConfig {
    PathfinderConfig {
        step_size:           20.0,
        obstacle_padding:    25.0,
        max_search_distance: 600.0,
    }
}

fn pathfinder(obstacles: Vec<Obstacle>) -> DetourPathfinder {
    DetourPathfinder::new(config(), ObstacleSet::new(obstacles).unwrap()).unwrap()
}

fn approx(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < 1e-3
}

// ── ObstacleSet ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod obstacle_set {
    use super::*;
    use crate::SpatialError;

    #[test]
    fn rejects_negative_radius() {
        let err = ObstacleSet::new(vec![Obstacle::new(0.0, 0.0, 5.0), Obstacle::new(1.0, 1.0, -1.0)])
            .err()
            .unwrap();
        assert_eq!(err, SpatialError::InvalidObstacle { id: ObstacleId(1), reason: "negative radius" });
    }

    #[test]
    fn rejects_nan_geometry() {
        assert!(ObstacleSet::new(vec![Obstacle::new(f32::NAN, 0.0, 5.0)]).is_err());
    }

    #[test]
    fn near_segment_filters_by_bounding_box() {
        let set = ObstacleSet::new(vec![
            Obstacle::new(100.0, 0.0, 20.0),
            Obstacle::new(100.0, 500.0, 20.0),
            Obstacle::new(50.0, 8.0, 10.0),
        ])
        .unwrap();
        let ids = set.near_segment(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0));
        assert_eq!(ids, vec![ObstacleId(0), ObstacleId(2)]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn contains_is_inclusive() {
        let o = Obstacle::new(0.0, 0.0, 10.0);
        assert!(o.contains(Vec2::new(10.0, 0.0)));
        assert!(!o.contains(Vec2::new(10.1, 0.0)));
    }
}

// ── DetourPathfinder ──────────────────────────────────────────────────────────

#[cfg(test)]
mod detour {
    use super::*;

    #[test]
    fn clear_line_returns_target_only() {
        let pf = pathfinder(vec![Obstacle::new(100.0, 200.0, 20.0)]);
        let target = Vec2::new(200.0, 0.0);
        assert_eq!(pf.find_path(Vec2::ZERO, target), vec![target]);
    }

    #[test]
    fn no_obstacles_returns_target_only() {
        let pf = DetourPathfinder::open_field(config()).unwrap();
        let target = Vec2::new(-40.0, 75.0);
        assert_eq!(pf.find_path(Vec2::ZERO, target), vec![target]);
    }

    #[test]
    fn single_straddling_obstacle_detours_at_padded_radius() {
        // Obstacle r=20 at (100,0) blocks (0,0)→(200,0); detour at 20+25=45.
        let pf = pathfinder(vec![Obstacle::new(100.0, 0.0, 20.0)]);
        let path = pf.find_path(Vec2::ZERO, Vec2::new(200.0, 0.0));
        assert_eq!(path.len(), 1);
        let p = path[0];
        assert!((p.x - 100.0).abs() < 1e-3, "{p}");
        assert!((p.y.abs() - 45.0).abs() < 1e-3, "{p}");
    }

    #[test]
    fn both_sides_clear_picks_side_nearer_start() {
        // Obstacle centre sits slightly below the line, so the two detour
        // points are (100, 43) and (100, -47); the upper one is nearer.
        let pf = pathfinder(vec![Obstacle::new(100.0, -2.0, 20.0)]);
        let path = pf.find_path(Vec2::ZERO, Vec2::new(200.0, 0.0));
        assert_eq!(path.len(), 1);
        assert!(approx(path[0], Vec2::new(100.0, 43.0)), "{}", path[0]);
    }

    #[test]
    fn only_clear_side_is_used() {
        // A second obstacle sits on the upper detour point.
        let pf = pathfinder(vec![
            Obstacle::new(100.0, 0.0, 20.0),
            Obstacle::new(100.0, 45.0, 15.0),
        ]);
        let path = pf.find_path(Vec2::ZERO, Vec2::new(200.0, 0.0));
        assert_eq!(path.len(), 1);
        assert!(approx(path[0], Vec2::new(100.0, -45.0)), "{}", path[0]);
    }

    #[test]
    fn no_clear_side_falls_back_to_target() {
        let pf = pathfinder(vec![
            Obstacle::new(100.0, 0.0, 20.0),
            Obstacle::new(100.0, 45.0, 15.0),
            Obstacle::new(100.0, -45.0, 15.0),
        ]);
        let target = Vec2::new(200.0, 0.0);
        assert_eq!(pf.find_path(Vec2::ZERO, target), vec![target]);
    }

    #[test]
    fn far_target_skips_search() {
        let pf = pathfinder(vec![Obstacle::new(350.0, 0.0, 50.0)]);
        let target = Vec2::new(700.0, 0.0);
        assert_eq!(pf.find_path(Vec2::ZERO, target), vec![target]);
    }

    #[test]
    fn closest_blocking_prefers_obstacle_nearest_line() {
        let pf = pathfinder(vec![
            Obstacle::new(60.0, 10.0, 15.0),
            Obstacle::new(140.0, 0.0, 15.0),
        ]);
        let a = Vec2::ZERO;
        let b = Vec2::new(200.0, 0.0);
        assert_eq!(pf.closest_blocking(a, b), Some(ObstacleId(1)));
    }

    #[test]
    fn non_finite_query_returns_empty_path() {
        let pf = pathfinder(vec![]);
        assert!(pf.find_path(Vec2::new(f32::NAN, 0.0), Vec2::ZERO).is_empty());
    }

    #[test]
    fn line_clear_checks_samples() {
        let pf = pathfinder(vec![Obstacle::new(100.0, 0.0, 20.0)]);
        assert!(!pf.is_line_clear(Vec2::ZERO, Vec2::new(200.0, 0.0)));
        assert!(pf.is_line_clear(Vec2::new(0.0, 50.0), Vec2::new(200.0, 50.0)));
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = PathfinderConfig { step_size: 0.0, ..config() };
        assert!(DetourPathfinder::open_field(bad).is_err());
    }

    #[test]
    fn set_obstacles_replaces_snapshot() {
        let mut pf = pathfinder(vec![Obstacle::new(100.0, 0.0, 20.0)]);
        pf.set_obstacles(ObstacleSet::empty());
        let target = Vec2::new(200.0, 0.0);
        assert_eq!(pf.find_path(Vec2::ZERO, target), vec![target]);
        assert!(pf.obstacles().is_empty());
    }
}

// ── Perception ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod perception {
    use ai_core::Vec2;

    use crate::{Perception, PerceptionConfig, SpatialError, is_within_radius, is_within_square_range};

    #[test]
    fn square_listen_boundary() {
        let p = Perception::default();
        let me = Vec2::new(10.0, 10.0);
        assert!(p.listen(me, 150.0, Some(Vec2::new(159.0, 10.0))).unwrap());
        assert!(!p.listen(me, 150.0, Some(Vec2::new(161.0, 10.0))).unwrap());
    }

    #[test]
    fn square_and_circle_disagree_on_corners() {
        let me = Vec2::ZERO;
        let corner = Vec2::new(100.0, 100.0);
        assert!(is_within_square_range(me, corner, 120.0));
        assert!(!is_within_radius(me, corner, 120.0));
    }

    #[test]
    fn missing_target_is_not_perceived() {
        let p = Perception::default();
        assert!(!p.listen(Vec2::ZERO, 150.0, None).unwrap());
        assert!(!p.listen_radius(Vec2::ZERO, 150.0, None).unwrap());
    }

    #[test]
    fn unset_distance_uses_default() {
        let p = Perception::new(PerceptionConfig { default_detection_distance: 80.0 });
        assert!(p.listen(Vec2::ZERO, 0.0, Some(Vec2::new(79.0, 0.0))).unwrap());
        assert!(!p.listen(Vec2::ZERO, 0.0, Some(Vec2::new(81.0, 0.0))).unwrap());
        assert_eq!(p.effective_distance(-3.0), 80.0);
    }

    #[test]
    fn radius_listen_has_no_default() {
        let p = Perception::new(PerceptionConfig { default_detection_distance: 80.0 });
        assert!(!p.listen_radius(Vec2::ZERO, 0.0, Some(Vec2::new(10.0, 0.0))).unwrap());
        assert!(p.listen_radius(Vec2::ZERO, 0.0, Some(Vec2::ZERO)).unwrap());
        assert!(p.listen_radius(Vec2::ZERO, 12.0, Some(Vec2::new(0.0, 12.0))).unwrap());
    }

    #[test]
    fn non_finite_is_an_error() {
        let p = Perception::default();
        let err = p.listen(Vec2::ZERO, 150.0, Some(Vec2::new(f32::INFINITY, 0.0))).unwrap_err();
        assert_eq!(err, SpatialError::NonFinite);
    }
}
