//! glam <-> nalgebra conversions at the rapier boundary

use glam::{Quat, Vec3};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

pub(crate) fn to_na_vec(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub(crate) fn from_na_vec(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn from_na_quat(q: &UnitQuaternion<f32>) -> Quat {
    let c = q.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

pub(crate) fn to_na_quat(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}
