//! Vector helpers shared by the physics adapter and the locomotion code
//!
//! Conventions: right-handed, Y up, forward is -Z, right is +X. Angles are in
//! degrees at this API boundary because every tunable that feeds them is
//! authored in degrees.

use glam::{Quat, Vec3};

/// World up
pub const UP: Vec3 = Vec3::Y;
/// Local forward axis of a body or camera
pub const FORWARD: Vec3 = Vec3::NEG_Z;
/// Local right axis of a body or camera
pub const RIGHT: Vec3 = Vec3::X;

/// Squared length under which a vector is treated as having no direction
pub const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;

/// Opposition deadband for [`opposed_on_horizontal`]
///
/// Two directions whose normalized horizontal dot product lies inside
/// `(-OPPOSITION_TOLERANCE, +inf)` are not considered opposed. This keeps
/// perpendicular vectors (dot within float noise of zero) from flipping.
pub const OPPOSITION_TOLERANCE: f32 = 1e-4;

/// Whether a vector is too short to carry a direction
pub fn is_degenerate(v: Vec3) -> bool {
    !v.is_finite() || v.length_squared() < DEGENERATE_LENGTH_SQUARED
}

/// Project `v` onto the line spanned by `onto` (zero if `onto` has no length)
pub fn project(v: Vec3, onto: Vec3) -> Vec3 {
    let denom = onto.length_squared();
    if denom < DEGENERATE_LENGTH_SQUARED {
        return Vec3::ZERO;
    }
    onto * (v.dot(onto) / denom)
}

/// Remove the component of `v` along `normal`
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let denom = normal.length_squared();
    if denom < DEGENERATE_LENGTH_SQUARED {
        return v;
    }
    v - normal * (v.dot(normal) / denom)
}

/// Drop the vertical component
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unsigned angle between two vectors, in degrees (0 for degenerate input)
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < DEGENERATE_LENGTH_SQUARED {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle from `from` to `to` in degrees, signed by the rotation sense about `axis`
///
/// Rotating `from` by the result about `axis` (see [`rotate_about`]) turns it
/// toward `to`.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let unsigned = angle_between(from, to);
    if axis.dot(from.cross(to)) < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// [`signed_angle`] measured in the plane perpendicular to `axis`
///
/// Only the rotation about `axis` is seen; tilt out of the plane is ignored,
/// so repeatedly rotating by the result converges instead of chasing it.
pub fn signed_angle_on_plane(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    signed_angle(project_on_plane(from, axis), project_on_plane(to, axis), axis)
}

/// Rotate `v` about `axis` by `degrees` (identity when the axis is degenerate)
pub fn rotate_about(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    if is_degenerate(axis) {
        return v;
    }
    Quat::from_axis_angle(axis.normalize(), degrees.to_radians()) * v
}

/// Whether `b` points against `a` once both are flattened onto the ground plane
///
/// `b` is measured along the horizontal direction of `a`; it is opposed when
/// that component is negative. Vectors without a horizontal direction are
/// never opposed.
pub fn opposed_on_horizontal(a: Vec3, b: Vec3) -> bool {
    let a = horizontal(a);
    let b = horizontal(b);
    if is_degenerate(a) || is_degenerate(b) {
        return false;
    }
    a.normalize().dot(b.normalize()) < -OPPOSITION_TOLERANCE
}

/// One rate-capped rotation step toward a remaining angle
///
/// Returns the whole remaining angle when it fits within `max_step`, otherwise
/// `max_step` with the sign of the remainder. Never overshoots.
pub fn capped_step(remaining: f32, max_step: f32) -> f32 {
    if remaining.abs() <= f32::EPSILON {
        return 0.0;
    }
    if remaining.abs() < max_step {
        remaining
    } else {
        max_step.copysign(remaining)
    }
}
