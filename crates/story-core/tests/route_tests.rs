// Host-side tests for SVG route parsing and marker sampling.

use glam::Vec2;
use story_core::*;

fn close(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < 1e-3
}

#[test]
fn straight_line_has_euclidean_length() {
    let route = Route::parse("M 0 0 L 3 4").unwrap();
    assert!((route.total_length() - 5.0).abs() < 1e-5);
    assert!(close(route.point_at_length(2.5), Vec2::new(1.5, 2.0)));
}

#[test]
fn relative_commands_follow_the_pen() {
    let route = Route::parse("m 10 10 l 10 0 v 10 h -10 z").unwrap();
    assert!((route.total_length() - 40.0).abs() < 1e-4);
    assert!(close(route.point_at_length(15.0), Vec2::new(20.0, 15.0)));
    assert!(close(route.point_at_length(40.0), Vec2::new(10.0, 10.0)));
}

#[test]
fn implicit_lineto_after_moveto() {
    let route = Route::parse("M0,0 10,0 10,10").unwrap();
    assert!((route.total_length() - 20.0).abs() < 1e-5);
}

#[test]
fn moveto_gap_adds_no_length() {
    let route = Route::parse("M 0 0 L 10 0 M 100 0 L 110 0").unwrap();
    assert!((route.total_length() - 20.0).abs() < 1e-5);
    assert!(close(route.point_at_length(10.0), Vec2::new(10.0, 0.0)));
    assert!(close(route.point_at_length(15.0), Vec2::new(105.0, 0.0)));
    assert!(!route.starts_subpath(0));
    assert!(route.starts_subpath(2));
    assert_eq!(route.vertex_lengths(), &[0.0, 10.0, 10.0, 20.0]);

    // relative moveto starts from the end of the previous subpath
    let route = Route::parse("m 0 0 h 5 m 10 0 v 5").unwrap();
    assert!((route.total_length() - 10.0).abs() < 1e-5);
    assert!(close(route.point_at_length(7.5), Vec2::new(15.0, 2.5)));
}

#[test]
fn plain_polyline_has_no_subpaths() {
    let pts = vec![Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(3.0, 4.0)];
    let route = Route::from_points(pts).unwrap();
    assert!((route.total_length() - 7.0).abs() < 1e-5);
    assert!((0..3).all(|i| !route.starts_subpath(i)));
    assert_eq!(Route::from_points(vec![Vec2::ONE]).unwrap_err(), PathError::ZeroLength);
}

#[test]
fn compact_numbers_parse() {
    let route = Route::parse("M0-5L1e1-5").unwrap();
    assert!((route.total_length() - 10.0).abs() < 1e-5);
}

#[test]
fn curve_length_is_between_chord_and_control_polygon() {
    let route = Route::parse("M 0 0 C 0 100 100 100 100 0").unwrap();
    let chord = 100.0;
    let polygon = 300.0;
    let len = route.total_length();
    assert!(len > chord && len < polygon, "length {len}");
    // symmetric curve: the midpoint by arc length is the apex
    let mid = route.point_at_length(len / 2.0);
    assert!((mid.x - 50.0).abs() < 0.5 && (mid.y - 75.0).abs() < 0.5, "{mid:?}");
}

#[test]
fn malformed_paths_are_typed_errors() {
    assert_eq!(Route::parse("   ").unwrap_err(), PathError::Empty);
    assert_eq!(Route::parse("L 1 1").unwrap_err(), PathError::MissingMoveTo('L'));
    assert_eq!(
        Route::parse("M 0 0 A 1 1 0 0 0 5 5").unwrap_err(),
        PathError::UnsupportedCommand('A')
    );
    assert!(matches!(Route::parse("M 0 0 L 1").unwrap_err(), PathError::ExpectedNumber(_)));
    assert_eq!(Route::parse("M 3 3 L 3 3").unwrap_err(), PathError::ZeroLength);
}

#[test]
fn every_builtin_route_parses() {
    for id in ScenarioId::ALL {
        let scenario = Scenario::builtin(id).unwrap();
        let route = Route::parse(scenario.route).unwrap();
        assert!(route.total_length() > 100.0, "{id} route too short");
    }
}

#[test]
fn sampler_clamps_progress_and_keeps_end_margin() {
    let route = Route::parse("M 0 0 L 100 0").unwrap();
    let sampler = RouteSampler::new(route, Lookahead::Distance(1.0), 0.1);
    assert!(close(sampler.sample(-0.5).point, Vec2::ZERO));
    let end = sampler.sample(3.0).point;
    assert!((end.x - 99.9).abs() < 1e-3);
    assert_eq!(sampler.sample(f64::NAN).point, Vec2::ZERO);
}

#[test]
fn heading_follows_the_tangent() {
    let route = Route::parse("M 0 0 L 10 0 L 10 10").unwrap();
    let sampler = RouteSampler::new(route, Lookahead::Distance(1.0), 0.0);
    assert!(sampler.sample(0.0).heading_deg.abs() < 1e-3);
    assert!((sampler.sample(0.75).heading_deg - 90.0).abs() < 1e-3);
}

#[test]
fn heading_survives_the_path_end() {
    let route = Route::parse("M 0 0 L 10 0 L 10 10").unwrap();
    let sampler = RouteSampler::new(route, Lookahead::Fraction(0.002), 0.0);
    let at_end = sampler.sample(1.0);
    assert!(close(at_end.point, Vec2::new(10.0, 10.0)));
    assert!((at_end.heading_deg - 90.0).abs() < 1e-2);
}

#[test]
fn sampling_is_continuous_in_progress() {
    for id in ScenarioId::ALL {
        let engine = StoryEngine::builtin(id).unwrap();
        let sampler = engine.sampler();
        let len = sampler.route().total_length();
        let steps = 2000;
        let eps = 1.0 / steps as f64;
        let mut prev = sampler.sample(0.0).point;
        for i in 1..=steps {
            let p = sampler.sample(i as f64 * eps).point;
            let jump = prev.distance(p);
            assert!(
                jump <= len * eps as f32 + 1e-2,
                "{id}: jump {jump} at step {i}"
            );
            prev = p;
        }
    }
}

#[test]
fn frame_position_tracks_journey_progress() {
    let engine = StoryEngine::builtin(ScenarioId::ColdChain).unwrap();
    let start = engine.frame_at(0).position.point;
    assert!(close(start, Vec2::new(750.0, 100.0)));
    let later = engine.frame_at(30).position.point;
    assert!(later.distance(start) > 50.0);
}
