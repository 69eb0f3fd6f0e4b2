//! Rigid rotation about an arbitrary axis.
//!
//! Angles are in degrees and follow the right-hand rule around the axis
//! direction.

use crate::error::KernelError;
use crate::geometry::line::Line;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;

/// Rodrigues' formula for a vector and a unit axis `u`:
/// `v cos + (u x v) sin + u (u . v)(1 - cos)`.
fn rodrigues(v: &Vec3, u: &Vec3, angle_deg: f64) -> Vec3 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    *v * c + u.cross(v) * s + *u * (u.dot(v) * (1.0 - c))
}

pub fn rotate_point_around_axis(point: &Point3d, axis: &Line, angle_deg: f64) -> Point3d {
    let u = axis.unit_direction();
    let v = *point - axis.point();
    axis.point() + rodrigues(&v, &u, angle_deg)
}

pub fn rotate_vector_around_axis(v: &Vec3, axis: &Line, angle_deg: f64) -> Vec3 {
    rodrigues(v, &axis.unit_direction(), angle_deg)
}

pub fn rotate_line_around_axis(line: &Line, axis: &Line, angle_deg: f64) -> Line {
    let point = rotate_point_around_axis(&line.point(), axis, angle_deg);
    let direction = rotate_vector_around_axis(&line.direction(), axis, angle_deg);
    Line::from_parts(point, direction)
}

pub fn rotate_plane_around_axis(
    plane: &Plane,
    axis: &Line,
    angle_deg: f64,
) -> Result<Plane, KernelError> {
    let anchor = rotate_point_around_axis(&plane.anchor(), axis, angle_deg);
    let normal = rotate_vector_around_axis(&plane.normal(), axis, angle_deg);
    Plane::from_point_normal(anchor, normal)
}
