//! Traces on the reference planes and classification of lines and planes
//! by their position relative to them.

use serde::{Deserialize, Serialize};

use crate::geometry::line::Line;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::intersection::plane_plane;

/// Where a line pierces the two reference planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineTraces {
    /// Intersection with `z = 0`; absent when the line is parallel to it.
    pub horizontal: Option<Point3d>,
    /// Intersection with `y = 0`; absent when the line is parallel to it.
    pub vertical: Option<Point3d>,
}

pub fn line_traces(line: &Line) -> LineTraces {
    let p = line.point();
    let d = line.direction();

    let horizontal = (!crate::is_zero(d.z)).then(|| line.at(-p.z / d.z));
    let vertical = (!crate::is_zero(d.y)).then(|| line.at(-p.y / d.y));

    LineTraces {
        horizontal,
        vertical,
    }
}

/// Trace lines of a plane on the reference planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneTraces {
    pub horizontal: Option<Line>,
    pub vertical: Option<Line>,
}

/// A plane parallel to (or equal to) a reference plane has no trace on it.
pub fn plane_traces(plane: &Plane) -> PlaneTraces {
    PlaneTraces {
        horizontal: plane_plane(plane, &Plane::HORIZONTAL),
        vertical: plane_plane(plane, &Plane::VERTICAL),
    }
}

/// Position of a plane relative to the reference planes, decided by which
/// components of its unit normal vanish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneKind {
    /// Parallel to the horizontal plane.
    Horizontal,
    /// Parallel to the vertical plane.
    Frontal,
    /// Perpendicular to the ground line.
    Profile,
    /// Perpendicular to the horizontal plane, oblique to the vertical one.
    VerticalProjecting,
    /// Perpendicular to the vertical plane, oblique to the horizontal one.
    EdgeProjecting,
    /// Parallel to the ground line without containing it.
    ParallelToGroundLine,
    ContainsGroundLine,
    Oblique,
}

pub fn classify_plane(plane: &Plane) -> PlaneKind {
    let n = plane.unit_normal();
    let zero = (crate::is_zero(n.x), crate::is_zero(n.y), crate::is_zero(n.z));

    match zero {
        (true, true, _) => PlaneKind::Horizontal,
        (true, _, true) => PlaneKind::Frontal,
        (_, true, true) => PlaneKind::Profile,
        (false, false, true) => PlaneKind::VerticalProjecting,
        (false, true, false) => PlaneKind::EdgeProjecting,
        (true, false, false) => {
            if plane.contains(&Point3d::ORIGIN) {
                PlaneKind::ContainsGroundLine
            } else {
                PlaneKind::ParallelToGroundLine
            }
        }
        (false, false, false) => PlaneKind::Oblique,
    }
}

/// Position of a line relative to the reference planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Perpendicular to the horizontal plane.
    Vertical,
    /// Perpendicular to the vertical plane.
    Perpendicular,
    /// Parallel to the ground line.
    FrontoHorizontal,
    /// Parallel to the horizontal plane only.
    Horizontal,
    /// Parallel to the vertical plane only.
    Frontal,
    /// In a plane perpendicular to the ground line.
    Profile,
    Oblique,
}

pub fn classify_line(line: &Line) -> LineKind {
    let d = line.unit_direction();
    let zero = (crate::is_zero(d.x), crate::is_zero(d.y), crate::is_zero(d.z));

    match zero {
        (true, true, _) => LineKind::Vertical,
        (true, _, true) => LineKind::Perpendicular,
        (_, true, true) => LineKind::FrontoHorizontal,
        (false, false, true) => LineKind::Horizontal,
        (false, true, false) => LineKind::Frontal,
        (true, false, false) => LineKind::Profile,
        (false, false, false) => LineKind::Oblique,
    }
}
