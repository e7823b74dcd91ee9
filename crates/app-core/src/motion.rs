//! Marker trajectories for each fishing state.
//!
//! Everything here is a pure function of progress or wall-clock time. The
//! session picks the curve matching its state each tick; renderers only ever
//! see the resulting [`MarkerPose`](crate::MarkerPose).

use glam::{Quat, Vec3};
use std::f32::consts::PI;

/// A sinusoid sampled against wall-clock seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    pub amplitude: f32,
    /// Angular frequency in rad/s.
    pub frequency: f32,
}

impl Oscillation {
    pub const fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    /// Sample at `now_sec`. The phase is computed in f64 so long sessions do
    /// not lose precision.
    #[inline]
    pub fn sample(&self, now_sec: f64) -> f32 {
        self.amplitude * (now_sec * self.frequency as f64).sin() as f32
    }
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Lofted throw from the rod tip to the landing point.
///
/// Horizontal axes follow an ease-out cubic so the bobber leaves fast and
/// settles; the vertical axis is linear plus `sin(p·π)·arc_height`, which is
/// zero at both ends.
pub fn cast_position(start: Vec3, target: Vec3, progress: f32, arc_height: f32) -> Vec3 {
    let p = progress.clamp(0.0, 1.0);
    let eased = ease_out_cubic(p);
    Vec3::new(
        start.x + (target.x - start.x) * eased,
        start.y + (target.y - start.y) * p + (p * PI).sin() * arc_height,
        start.z + (target.z - start.z) * eased,
    )
}

/// Pull from the landing point back to the boat; slow start, fast finish.
#[inline]
pub fn reel_position(target: Vec3, destination: Vec3, progress: f32) -> Vec3 {
    target.lerp(destination, ease_in_quad(progress))
}

/// Continuous spin applied to a hooked catch. Depends on time since the reel
/// began, never on reel progress.
pub fn catch_spin(axis: Vec3, elapsed_sec: f64, rate: f32) -> Quat {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_axis_angle(axis, (elapsed_sec.max(0.0) as f32) * rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn easing_curves_hit_endpoints_and_clamp() {
        assert!(approx(ease_out_cubic(0.0), 0.0));
        assert!(approx(ease_out_cubic(1.0), 1.0));
        assert!(approx(ease_in_quad(0.0), 0.0));
        assert!(approx(ease_in_quad(1.0), 1.0));
        assert!(approx(ease_out_cubic(2.0), 1.0));
        assert!(approx(ease_in_quad(-1.0), 0.0));
        // ease-out is ahead of linear, ease-in behind it
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!(ease_in_quad(0.5) < 0.5);
    }

    #[test]
    fn cast_departs_and_lands_on_baseline() {
        let start = Vec3::new(0.0, 3.0, 1.0);
        let target = Vec3::new(4.0, 0.0, -8.0);
        let p0 = cast_position(start, target, 0.0, 2.5);
        let p1 = cast_position(start, target, 1.0, 2.5);
        assert!(p0.abs_diff_eq(start, 1e-4));
        assert!(p1.abs_diff_eq(target, 1e-4));
    }

    #[test]
    fn cast_arc_lifts_midpoint_above_straight_line() {
        let start = Vec3::new(0.0, 3.0, 1.0);
        let target = Vec3::new(0.0, 0.0, -8.0);
        let mid = cast_position(start, target, 0.5, 2.5);
        let straight_y = 1.5;
        assert!(approx(mid.y, straight_y + 2.5));
        // horizontal motion is eased, so past the halfway mark already
        assert!(mid.z < (start.z + target.z) / 2.0);
    }

    #[test]
    fn reel_moves_from_target_to_destination() {
        let target = Vec3::new(2.0, 0.0, -9.0);
        let dest = Vec3::new(0.0, 2.0, 2.0);
        assert!(reel_position(target, dest, 0.0).abs_diff_eq(target, 1e-5));
        assert!(reel_position(target, dest, 1.0).abs_diff_eq(dest, 1e-5));
        let quarter = reel_position(target, dest, 0.5);
        assert!(quarter.abs_diff_eq(target.lerp(dest, 0.25), 1e-5));
    }

    #[test]
    fn oscillation_stays_within_amplitude() {
        let bob = Oscillation::new(0.15, 12.0);
        for i in 0..500 {
            let v = bob.sample(i as f64 * 0.013);
            assert!(v.abs() <= 0.15 + 1e-6);
        }
        assert_eq!(Oscillation::new(0.0, 5.0).sample(3.3), 0.0);
    }

    #[test]
    fn spin_grows_with_elapsed_time_only() {
        let a = catch_spin(Vec3::Y, 0.0, 2.0);
        assert!(a.abs_diff_eq(Quat::IDENTITY, 1e-6));
        let b = catch_spin(Vec3::Y, 0.5, 2.0);
        let (axis, angle) = b.to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-4));
        assert!(approx(angle, 1.0));
        assert_eq!(catch_spin(Vec3::ZERO, 1.0, 2.0), Quat::IDENTITY);
    }
}
