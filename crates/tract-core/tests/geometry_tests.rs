// Host-side tests for the polar tract transform.

use glam::Vec2;
use tract_core::{TractGeometry, TractPoint};

#[test]
fn forward_transform_matches_polar_layout() {
    let g = TractGeometry::default();
    // index 0, diameter 0 sits at angle_offset on the base circle
    let p = g.to_screen(TractPoint::new(0.0, 0.0));
    let angle = -0.25_f32;
    let expected = Vec2::new(
        340.0 - 298.0 * angle.cos(),
        460.0 - 298.0 * angle.sin(),
    );
    assert!((p - expected).length() < 1e-3);
}

#[test]
fn wider_diameter_pulls_toward_origin() {
    let g = TractGeometry::default();
    let narrow = g.to_screen(TractPoint::new(20.0, 0.5));
    let wide = g.to_screen(TractPoint::new(20.0, 3.5));
    let d_narrow = (narrow - g.origin).length();
    let d_wide = (wide - g.origin).length();
    assert!(d_wide < d_narrow);
    assert!((d_narrow - d_wide - 60.0 * 3.0).abs() < 1e-2);
}

#[test]
fn round_trip_over_valid_ranges() {
    let g = TractGeometry::default();
    for i in 0..=44 {
        for d in 0..=8 {
            let point = TractPoint::new(i as f32, d as f32 * 0.5);
            let back = g.to_tract_space(g.to_screen(point));
            assert!(
                (back.index - point.index).abs() < 1e-2,
                "index {} -> {}",
                point.index,
                back.index
            );
            assert!(
                (back.diameter - point.diameter).abs() < 1e-3,
                "diameter {} -> {}",
                point.diameter,
                back.diameter
            );
        }
    }
}

#[test]
fn inverse_handles_points_past_the_atan2_seam() {
    let g = TractGeometry::default();
    // A pixel just below and left of the origin recovers a small index, not
    // a huge one from the wrong atan2 branch.
    let p = g.to_tract_space(Vec2::new(g.origin.x - 250.0, g.origin.y - 40.0));
    assert!(p.index.is_finite());
    assert!(p.index < 10.0);
}

#[test]
fn wobble_is_zero_when_silent() {
    let g = TractGeometry::default();
    let point = TractPoint::new(30.0, 1.5);
    assert_eq!(g.wobble(30.0, 0.123, 0.0), 0.0);
    let still = g.to_screen_wobbled(point, 0.123, 0.0);
    assert!((still - g.to_screen(point)).length() < 1e-6);
}

#[test]
fn wobble_grows_with_index_and_amplitude() {
    let g = TractGeometry::default();
    // over a sweep of times, the far end wobbles more than the near end
    let mut max_near = 0.0_f32;
    let mut max_far = 0.0_f32;
    for t in 0..100 {
        let now = t as f64 * 0.013;
        max_near = max_near.max(g.wobble(4.0, now, 1.0).abs());
        max_far = max_far.max(g.wobble(40.0, now, 1.0).abs());
    }
    assert!(max_far > max_near);
    for t in 0..100 {
        let now = t as f64 * 0.013;
        let half = g.wobble(40.0, now, 0.5);
        let full = g.wobble(40.0, now, 1.0);
        assert!((full - 2.0 * half).abs() < 1e-5);
    }
}

#[test]
fn clamped_limits_both_components() {
    let p = TractPoint::new(-3.0, 9.0).clamped(44.0, 4.0);
    assert_eq!(p.index, 0.0);
    assert_eq!(p.diameter, 4.0);
    let q = TractPoint::new(50.0, -1.0).clamped(44.0, 4.0);
    assert_eq!(q.index, 44.0);
    assert_eq!(q.diameter, 0.0);
}
