//! Orthogonal projections of a point on the two reference planes.

use serde::{Deserialize, Serialize};

use crate::geometry::point::{Point2d, Point3d};

/// The two views of a point as drawn in the dihedral system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DihedralProjection {
    /// Projection on `z = 0`, as `(x, y)`.
    pub horizontal: Point2d,
    /// Projection on `y = 0`, as `(x, z)`.
    pub vertical: Point2d,
    /// Distance in front of the vertical plane (alejamiento).
    pub depth: f64,
    /// Height above the horizontal plane (cota).
    pub height: f64,
}

pub fn project(point: &Point3d) -> DihedralProjection {
    DihedralProjection {
        horizontal: Point2d::new(point.x, point.y),
        vertical: Point2d::new(point.x, point.z),
        depth: point.y,
        height: point.z,
    }
}

/// Dihedral quadrant holding a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// In front of the vertical plane and above the horizontal one.
    First,
    /// Behind and above.
    Second,
    /// Behind and below.
    Third,
    /// In front and below.
    Fourth,
    /// On one of the reference planes.
    OnReferencePlanes,
}

pub fn quadrant(point: &Point3d) -> Quadrant {
    if crate::is_coincident(point.y) || crate::is_coincident(point.z) {
        return Quadrant::OnReferencePlanes;
    }
    match (point.y > 0.0, point.z > 0.0) {
        (true, true) => Quadrant::First,
        (false, true) => Quadrant::Second,
        (false, false) => Quadrant::Third,
        (true, false) => Quadrant::Fourth,
    }
}
