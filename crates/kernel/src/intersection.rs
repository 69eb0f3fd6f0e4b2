use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::line::Line;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;

// ─── Line-Line ──────────────────────────────────────────────────────────────

/// How two lines sit relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum LineLineRelation {
    Intersecting(Point3d),
    Parallel,
    Coincident,
    Skew,
}

/// Closest points between two lines, or `None` when they are parallel
/// (the Gram determinant `|d1|^2 |d2|^2 - (d1 . d2)^2` is below `EPS_ZERO`).
pub(crate) fn closest_approach(l1: &Line, l2: &Line) -> Option<(Point3d, Point3d)> {
    let d1 = l1.direction();
    let d2 = l2.direction();
    let a = d1.dot(&d1);
    let b = d1.dot(&d2);
    let c = d2.dot(&d2);
    let denom = a * c - b * b;
    if crate::is_zero(denom) {
        return None;
    }

    let w = l1.point() - l2.point();
    let d = d1.dot(&w);
    let e = d2.dot(&w);
    let t1 = (b * e - c * d) / denom;
    let t2 = (a * e - b * d) / denom;
    Some((l1.at(t1), l2.at(t2)))
}

pub fn line_line_relation(l1: &Line, l2: &Line) -> LineLineRelation {
    match closest_approach(l1, l2) {
        None if l1.contains(&l2.point()) => LineLineRelation::Coincident,
        None => LineLineRelation::Parallel,
        Some((p1, p2)) if crate::is_coincident(p1.distance_to(&p2)) => {
            LineLineRelation::Intersecting(p1)
        }
        Some(_) => LineLineRelation::Skew,
    }
}

/// Common point of two lines. Parallel, coincident and skew lines all give
/// `None`; use [`line_line_relation`] to tell them apart.
pub fn line_line(l1: &Line, l2: &Line) -> Option<Point3d> {
    match line_line_relation(l1, l2) {
        LineLineRelation::Intersecting(p) => Some(p),
        _ => None,
    }
}

// ─── Line-Plane ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum LinePlaneRelation {
    Point(Point3d),
    /// The line lies in the plane.
    Contained,
    /// The line is parallel to the plane and off it.
    Parallel,
}

pub fn line_plane_relation(line: &Line, plane: &Plane) -> LinePlaneRelation {
    let n = plane.normal();
    let denom = n.dot(&line.direction());
    if crate::is_zero(denom) {
        return if plane.contains(&line.point()) {
            LinePlaneRelation::Contained
        } else {
            LinePlaneRelation::Parallel
        };
    }
    let t = -plane.signed_value(&line.point()) / denom;
    LinePlaneRelation::Point(line.at(t))
}

/// Piercing point of a line through a plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePlaneHit {
    pub point: Option<Point3d>,
    /// Set when `point` is absent because the line lies in the plane.
    pub contained: bool,
}

pub fn line_plane(line: &Line, plane: &Plane) -> LinePlaneHit {
    match line_plane_relation(line, plane) {
        LinePlaneRelation::Point(p) => LinePlaneHit {
            point: Some(p),
            contained: false,
        },
        LinePlaneRelation::Contained => LinePlaneHit {
            point: None,
            contained: true,
        },
        LinePlaneRelation::Parallel => LinePlaneHit {
            point: None,
            contained: false,
        },
    }
}

// ─── Plane-Plane ────────────────────────────────────────────────────────────

/// Solve `[a11 a12; a21 a22] [u v]^T = [b1 b2]^T` by Cramer's rule.
fn cramer_2x2(a11: f64, a12: f64, a21: f64, a22: f64, b1: f64, b2: f64) -> (f64, f64) {
    let det = a11 * a22 - a12 * a21;
    ((b1 * a22 - a12 * b2) / det, (a11 * b2 - b1 * a21) / det)
}

/// Intersection line of two planes; `None` when they are parallel or equal.
///
/// The point on the line is found with the coordinate along the dominant
/// component of the direction set to zero, so the 2x2 minor solved is the
/// best conditioned of the three.
pub fn plane_plane(p1: &Plane, p2: &Plane) -> Option<Line> {
    let n1 = p1.normal();
    let n2 = p2.normal();
    let direction = n1.cross(&n2);
    if crate::is_zero(direction.length()) {
        return None;
    }

    let (b1, b2) = (-p1.constant(), -p2.constant());
    let (ax, ay, az) = (direction.x.abs(), direction.y.abs(), direction.z.abs());

    let point = if az >= ax && az >= ay {
        let (x, y) = cramer_2x2(n1.x, n1.y, n2.x, n2.y, b1, b2);
        Point3d::new(x, y, 0.0)
    } else if ax >= ay {
        let (y, z) = cramer_2x2(n1.y, n1.z, n2.y, n2.z, b1, b2);
        Point3d::new(0.0, y, z)
    } else {
        let (x, z) = cramer_2x2(n1.x, n1.z, n2.x, n2.z, b1, b2);
        Point3d::new(x, 0.0, z)
    };

    Some(Line::from_parts(point, direction))
}

// ─── Composite cases ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ThreePlanes {
    Point(Point3d),
    /// The planes form a sheaf around this common line.
    Line(Line),
    None,
}

pub fn three_planes(p1: &Plane, p2: &Plane, p3: &Plane) -> ThreePlanes {
    let (n1, n2, n3) = (p1.normal(), p2.normal(), p3.normal());
    let det = n1.triple(&n2, &n3);

    if !crate::is_zero(det) {
        let sum: Vec3 = n2.cross(&n3) * -p1.constant()
            + n3.cross(&n1) * -p2.constant()
            + n1.cross(&n2) * -p3.constant();
        let v = sum / det;
        return ThreePlanes::Point(Point3d::new(v.x, v.y, v.z));
    }

    trace!(det, "planes have no single common point");
    match plane_plane(p1, p2) {
        None => ThreePlanes::None,
        Some(line) if p3.contains(&line.point()) => {
            trace!("third plane holds the first two planes' intersection");
            ThreePlanes::Line(line)
        }
        Some(_) => ThreePlanes::None,
    }
}

/// Point where three lines are concurrent.
pub fn three_lines(l1: &Line, l2: &Line, l3: &Line) -> Option<Point3d> {
    let candidate = line_line(l1, l2)?;
    // Raw cross product: the third direction's length scales the tolerance.
    let miss = (candidate - l3.point()).cross(&l3.direction()).length();
    if crate::is_coincident(miss) {
        Some(candidate)
    } else {
        trace!(?candidate, "third line misses the common point");
        None
    }
}

/// Point where the intersection line of two planes meets a third line.
pub fn two_planes_one_line(p1: &Plane, p2: &Plane, line: &Line) -> Option<Point3d> {
    let common = plane_plane(p1, p2)?;
    line_line(&common, line)
}

/// Piercing points of two lines through one plane, found independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiercingPoints {
    pub first: Option<Point3d>,
    pub second: Option<Point3d>,
}

pub fn two_lines_one_plane(l1: &Line, l2: &Line, plane: &Plane) -> PiercingPoints {
    PiercingPoints {
        first: line_plane(l1, plane).point,
        second: line_plane(l2, plane).point,
    }
}
