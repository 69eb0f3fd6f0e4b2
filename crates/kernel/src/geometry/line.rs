use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;
use crate::error::KernelError;

/// An infinite line given by a point on it and a direction.
///
/// The direction keeps the caller's length and sense; only a (near) zero
/// direction is rejected. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLine", into = "RawLine")]
pub struct Line {
    point: Point3d,
    direction: Vec3,
}

#[derive(Serialize, Deserialize)]
struct RawLine {
    point: Point3d,
    direction: Vec3,
}

impl TryFrom<RawLine> for Line {
    type Error = KernelError;

    fn try_from(raw: RawLine) -> Result<Self, Self::Error> {
        Line::new(raw.point, raw.direction)
    }
}

impl From<Line> for RawLine {
    fn from(line: Line) -> Self {
        RawLine {
            point: line.point,
            direction: line.direction,
        }
    }
}

impl Line {
    pub fn new(point: Point3d, direction: Vec3) -> Result<Self, KernelError> {
        if !point.is_finite() {
            return Err(KernelError::NonFinite { what: "line point" });
        }
        if !direction.is_finite() {
            return Err(KernelError::NonFinite {
                what: "line direction",
            });
        }
        if crate::is_zero(direction.length()) {
            return Err(KernelError::ZeroDirection);
        }
        Ok(Self { point, direction })
    }

    /// Line through two distinct points, directed from `a` to `b`.
    pub fn through(a: Point3d, b: Point3d) -> Result<Self, KernelError> {
        if a.is_finite() && b.is_finite() && crate::is_coincident(a.distance_to(&b)) {
            return Err(KernelError::CoincidentPoints);
        }
        Self::new(a, b - a)
    }

    /// Build from parts already known to satisfy the invariant, e.g. a cross
    /// product whose length was just tested.
    pub(crate) fn from_parts(point: Point3d, direction: Vec3) -> Self {
        debug_assert!(!crate::is_zero(direction.length()));
        Self { point, direction }
    }

    pub fn point(&self) -> Point3d {
        self.point
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn unit_direction(&self) -> Vec3 {
        self.direction.normalize()
    }

    /// Point at parameter `t`, in units of the stored direction.
    pub fn at(&self, t: f64) -> Point3d {
        self.point + self.direction * t
    }

    /// Foot of the perpendicular from `p`, with its parameter.
    pub fn closest_point(&self, p: &Point3d) -> (Point3d, f64) {
        let t = (*p - self.point).dot(&self.direction) / self.direction.length_squared();
        (self.at(t), t)
    }

    /// Length of the rejection of `p - point` from the direction.
    pub fn distance_to_point(&self, p: &Point3d) -> f64 {
        (*p - self.point).cross(&self.direction).length() / self.direction.length()
    }

    pub fn contains(&self, p: &Point3d) -> bool {
        crate::is_coincident(self.distance_to_point(p))
    }
}
