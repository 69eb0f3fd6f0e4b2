//! True distances between points, lines and planes, with the pair of closest
//! points that realise them when that pair is unique enough to draw.

use serde::{Deserialize, Serialize};

use crate::geometry::line::Line;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::intersection::{LinePlaneRelation, closest_approach, line_plane_relation};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    /// Closest point on the first entity and on the second one. Absent for
    /// intersecting planes, where every point of the common line qualifies.
    pub closest: Option<(Point3d, Point3d)>,
}

impl Distance {
    fn between(a: Point3d, b: Point3d) -> Self {
        Self {
            value: a.distance_to(&b),
            closest: Some((a, b)),
        }
    }

    /// Same distance seen from the other entity.
    pub fn swapped(self) -> Self {
        Self {
            value: self.value,
            closest: self.closest.map(|(a, b)| (b, a)),
        }
    }
}

pub fn distance_point_point(a: &Point3d, b: &Point3d) -> Distance {
    Distance::between(*a, *b)
}

pub fn distance_point_line(p: &Point3d, line: &Line) -> Distance {
    let (foot, _) = line.closest_point(p);
    Distance {
        value: line.distance_to_point(p),
        closest: Some((*p, foot)),
    }
}

pub fn distance_point_plane(p: &Point3d, plane: &Plane) -> Distance {
    Distance {
        value: plane.signed_value(p).abs() / plane.normal().length(),
        closest: Some((*p, plane.project_point(p))),
    }
}

/// Distance between two lines: the common perpendicular for skew lines, the
/// point-to-line distance for parallel ones and zero for crossing ones.
pub fn distance_skew_lines(l1: &Line, l2: &Line) -> Distance {
    let cross = l1.direction().cross(&l2.direction());
    let cross_len = cross.length();
    if crate::is_zero(cross_len) {
        return distance_point_line(&l1.point(), l2);
    }

    let value = (l2.point() - l1.point()).dot(&cross).abs() / cross_len;
    Distance {
        value,
        closest: closest_approach(l1, l2),
    }
}

/// Zero unless the line is parallel to the plane and off it.
pub fn distance_line_plane(line: &Line, plane: &Plane) -> Distance {
    match line_plane_relation(line, plane) {
        LinePlaneRelation::Point(p) => Distance {
            value: 0.0,
            closest: Some((p, p)),
        },
        LinePlaneRelation::Contained | LinePlaneRelation::Parallel => {
            distance_point_plane(&line.point(), plane)
        }
    }
}

/// Zero unless the planes are parallel.
pub fn distance_plane_plane(p1: &Plane, p2: &Plane) -> Distance {
    if !p1.is_parallel_to(p2) {
        return Distance {
            value: 0.0,
            closest: None,
        };
    }
    let anchor = p1.anchor();
    distance_point_plane(&anchor, p2)
}
