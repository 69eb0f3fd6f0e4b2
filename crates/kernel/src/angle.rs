//! Angles between lines and planes, in degrees.

use serde::{Deserialize, Serialize};

use crate::geometry::line::Line;
use crate::geometry::plane::Plane;
use crate::geometry::vector::Vec3;

fn cosine(a: &Vec3, b: &Vec3) -> f64 {
    a.dot(b) / (a.length() * b.length())
}

/// Angle between the two direction senses, `0..=180`.
pub fn angle_line_line(l1: &Line, l2: &Line) -> f64 {
    l1.direction().angle_to(&l2.direction()).to_degrees()
}

/// Angle between a line and its projection on the plane, `0..=90`.
pub fn angle_line_plane(line: &Line, plane: &Plane) -> f64 {
    cosine(&line.direction(), &plane.normal())
        .abs()
        .clamp(0.0, 1.0)
        .asin()
        .to_degrees()
}

/// Dihedral angle between two planes, `0..=90`.
pub fn angle_plane_plane(p1: &Plane, p2: &Plane) -> f64 {
    cosine(&p1.normal(), &p2.normal())
        .abs()
        .clamp(0.0, 1.0)
        .acos()
        .to_degrees()
}

/// Inclinations of a line to the two reference planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAngles {
    /// Angle with the horizontal plane.
    pub horizontal: f64,
    /// Angle with the vertical plane.
    pub vertical: f64,
}

pub fn line_reference_angles(line: &Line) -> ReferenceAngles {
    ReferenceAngles {
        horizontal: angle_line_plane(line, &Plane::HORIZONTAL),
        vertical: angle_line_plane(line, &Plane::VERTICAL),
    }
}
