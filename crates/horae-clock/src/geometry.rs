//! Clock-face geometry.
//!
//! Angles are radians in screen space (+Y down): after [`adjust_angle`],
//! angle 0 points at 12 o'clock and angles grow clockwise.

use std::f32::consts::{FRAC_PI_2, PI};

use horae_engine::coords::Vec2;

#[inline]
pub fn polar_to_cartesian(distance: f32, angle: f32) -> Vec2 {
    Vec2::new(distance * angle.cos(), distance * angle.sin())
}

/// Rotates a clock angle into the polar frame (0 = +X).
#[inline]
pub fn adjust_angle(angle: f32) -> f32 {
    angle - FRAC_PI_2
}

#[inline]
pub fn clock_polar_to_cartesian(distance: f32, angle: f32) -> Vec2 {
    polar_to_cartesian(distance, adjust_angle(angle))
}

/// `hours` may be fractional (e.g. `3.5` for half past three).
#[inline]
pub fn hours_to_angle(hours: f32) -> f32 {
    PI / 6.0 * hours
}

/// `minutes` may be fractional.
#[inline]
pub fn minutes_to_angle(minutes: f32) -> f32 {
    PI / 30.0 * minutes
}

#[inline]
pub fn seconds_to_angle(seconds: u32) -> f32 {
    minutes_to_angle(seconds as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn approx_v(a: Vec2, b: Vec2) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    /// Equal modulo a full turn.
    fn same_direction(a: f32, b: f32) -> bool {
        let d = (a - b).rem_euclid(TAU);
        d < EPS || TAU - d < EPS
    }

    // ── angles ──

    #[test]
    fn hour_angles() {
        assert!(approx(hours_to_angle(3.0), FRAC_PI_2));
        assert!(approx(hours_to_angle(6.5), 13.0 * PI / 12.0));
        assert!(same_direction(hours_to_angle(12.0), hours_to_angle(0.0)));
    }

    #[test]
    fn minute_and_second_angles_agree() {
        for x in [0u32, 1, 15, 30, 59] {
            assert_eq!(seconds_to_angle(x), minutes_to_angle(x as f32));
            assert!(approx(minutes_to_angle(x as f32), x as f32 * PI / 30.0));
        }
        assert!(same_direction(minutes_to_angle(60.0), 0.0));
        assert!(approx(minutes_to_angle(30.0), PI));
    }

    // ── polar conversion ──

    #[test]
    fn zero_points_up() {
        assert!(approx_v(clock_polar_to_cartesian(10.0, 0.0), Vec2::new(0.0, -10.0)));
    }

    #[test]
    fn quarter_turn_points_right() {
        assert!(approx_v(clock_polar_to_cartesian(10.0, FRAC_PI_2), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn negative_distance_points_backwards() {
        // Second-hand tail.
        assert!(approx_v(clock_polar_to_cartesian(-25.0, 0.0), Vec2::new(0.0, 25.0)));
    }

    #[test]
    fn plain_polar_is_unrotated() {
        assert!(approx_v(polar_to_cartesian(2.0, 0.0), Vec2::new(2.0, 0.0)));
        assert!(approx(adjust_angle(FRAC_PI_2), 0.0));
    }
}
