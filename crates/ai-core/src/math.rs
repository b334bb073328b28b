//! Small vector helpers on top of `glam`.
//!
//! Ground locomotion works on the x/z plane; `y` is up.

use glam::Vec3;

/// Drops the vertical component.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points measured on the ground plane.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a - b).length()
}

/// Scales `v` down to `max_length` if it is longer.
///
/// Non-finite input collapses to zero so a bad sensor reading can't poison a
/// velocity for the rest of the run.
pub fn clamp_magnitude(v: Vec3, max_length: f32) -> Vec3 {
    if !v.is_finite() {
        return Vec3::ZERO;
    }
    v.clamp_length_max(max_length.max(0.0))
}
