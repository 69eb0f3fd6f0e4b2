//! Unfolding (abatimiento): revolving a plane about its horizontal trace
//! until it lies on the horizontal reference plane, so that figures on it
//! show their true shape.
//!
//! The construction is closed form. A point `P` on the plane has footprint
//! `F` on `z = 0`; its pivot `O` is the foot of the perpendicular from `F`
//! to the hinge. The unfolded point sits at `O + R u`, where
//! `R = sqrt(|F - O|^2 + P.z^2)` is the true distance from `P` to the hinge
//! and `u` the unit vector from `O` towards `F`.

use serde::{Deserialize, Serialize};

use crate::error::KernelError;
use crate::geometry::line::Line;
use crate::geometry::plane::Plane;
use crate::geometry::point::{Point2d, Point3d};
use crate::geometry::vector::Vec3;

/// The horizontal trace of a plane, `a x + b y + d = 0` on `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hinge {
    pub a: f64,
    pub b: f64,
    pub d: f64,
}

impl Hinge {
    /// Foot of the perpendicular from `footprint` to the hinge.
    pub fn pivot(&self, footprint: &Point2d) -> Point2d {
        let k = (self.a * footprint.x + self.b * footprint.y + self.d)
            / (self.a * self.a + self.b * self.b);
        Point2d::new(footprint.x - k * self.a, footprint.y - k * self.b)
    }

    /// Unit direction along the hinge, `(-b, a)` normalized.
    pub fn direction(&self) -> (f64, f64) {
        let len = self.a.hypot(self.b);
        (-self.b / len, self.a / len)
    }

    /// Side used when a footprint lies on the hinge itself: the hinge
    /// direction turned a quarter counter-clockwise.
    pub fn canonical_side(&self) -> (f64, f64) {
        let (tx, ty) = self.direction();
        (-ty, tx)
    }

    pub fn as_line(&self) -> Line {
        let origin = self.pivot(&Point2d::ORIGIN);
        Line::from_parts(
            Point3d::new(origin.x, origin.y, 0.0),
            Vec3::new(-self.b, self.a, 0.0),
        )
    }
}

/// Hinge of a plane, or `None` for a horizontal plane, which has no
/// horizontal trace and unfolds by plain vertical projection.
pub fn hinge(plane: &Plane) -> Option<Hinge> {
    let unit = plane.unit_normal();
    if crate::is_zero(unit.x) && crate::is_zero(unit.y) {
        return None;
    }
    let n = plane.normal();
    Some(Hinge {
        a: n.x,
        b: n.y,
        d: plane.constant(),
    })
}

pub fn unfold_point_on_plane(plane: &Plane, point: &Point3d) -> Result<Point3d, KernelError> {
    if !point.is_finite() {
        return Err(KernelError::NonFinite { what: "point" });
    }
    let distance = plane.signed_distance(point);
    if !crate::is_coincident(distance) {
        return Err(KernelError::PointNotOnPlane { distance });
    }

    let Some(hinge) = hinge(plane) else {
        return Ok(Point3d::new(point.x, point.y, 0.0));
    };

    let footprint = point.footprint();
    let pivot = hinge.pivot(&footprint);
    let d = footprint.distance_to(&pivot);
    let radius = d.hypot(point.z);

    let (ux, uy) = if crate::is_zero(d) {
        hinge.canonical_side()
    } else {
        ((footprint.x - pivot.x) / d, (footprint.y - pivot.y) / d)
    };

    Ok(Point3d::new(pivot.x + radius * ux, pivot.y + radius * uy, 0.0))
}

/// Unfold every vertex of a figure lying on `plane`.
pub fn unfold_points_on_plane(
    plane: &Plane,
    points: &[Point3d],
) -> Result<Vec<Point3d>, KernelError> {
    points
        .iter()
        .map(|p| unfold_point_on_plane(plane, p))
        .collect()
}

/// Inverse of [`unfold_point_on_plane`] (desabatimiento): the point of
/// `plane` whose unfolding is `unfolded`, which must lie on `z = 0`.
///
/// For a plane perpendicular to the horizontal plane every unfolding uses the
/// canonical side, so the height sign is lost; the point above `z = 0` is
/// returned.
pub fn fold_point_onto_plane(plane: &Plane, unfolded: &Point3d) -> Result<Point3d, KernelError> {
    if !unfolded.is_finite() {
        return Err(KernelError::NonFinite { what: "point" });
    }
    if !crate::is_coincident(unfolded.z) {
        return Err(KernelError::PointNotOnPlane {
            distance: unfolded.z,
        });
    }

    let n = plane.normal();
    let Some(hinge) = hinge(plane) else {
        return Ok(Point3d::new(
            unfolded.x,
            unfolded.y,
            -plane.constant() / n.z,
        ));
    };

    let footprint = unfolded.footprint();
    let pivot = hinge.pivot(&footprint);
    let radius = footprint.distance_to(&pivot);

    if crate::is_zero(plane.unit_normal().z) {
        return Ok(Point3d::new(pivot.x, pivot.y, radius));
    }

    // Walk from the pivot along the line of greatest slope.
    let slope = hinge.a.hypot(hinge.b);
    let (gx, gy) = (hinge.a / slope, hinge.b / slope);
    let side = ((footprint.x - pivot.x) * gx + (footprint.y - pivot.y) * gy).signum();
    let s = side * radius / (1.0 + (slope / n.z).powi(2)).sqrt();

    Ok(Point3d::new(
        pivot.x + s * gx,
        pivot.y + s * gy,
        -s * slope / n.z,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traces::plane_traces;
    use approx::assert_abs_diff_eq;

    fn plane(n: [f64; 3], c: f64) -> Plane {
        Plane::new(Vec3::from_array(n), c).unwrap()
    }

    #[test]
    fn test_horizontal_plane_unfolds_to_footprint() {
        let p = plane([0.0, 0.0, 1.0], -5.0);
        let r = unfold_point_on_plane(&p, &Point3d::new(3.0, 4.0, 5.0)).unwrap();
        assert_eq!(r, Point3d::new(3.0, 4.0, 0.0));
        assert!(hinge(&p).is_none());
    }

    #[test]
    fn test_plane_through_ground_line_at_45_degrees() {
        // y = z
        let p = plane([0.0, 1.0, -1.0], 0.0);
        let r = unfold_point_on_plane(&p, &Point3d::new(2.0, 3.0, 3.0)).unwrap();
        assert_abs_diff_eq!(r, Point3d::new(2.0, 3.0 * 2.0_f64.sqrt(), 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_radius_is_preserved() {
        let p = plane([1.0, 2.0, 2.0], -6.0);
        let point = p.project_point(&Point3d::new(3.0, -1.0, 4.0));
        let h = hinge(&p).unwrap();

        let footprint = point.footprint();
        let pivot = h.pivot(&footprint);
        let expected = footprint.distance_to(&pivot).hypot(point.z);

        let r = unfold_point_on_plane(&p, &point).unwrap();
        assert!(r.z.abs() < 1e-12);
        assert!((r.footprint().distance_to(&pivot) - expected).abs() < 1e-9);
        assert!((h.as_line().distance_to_point(&point) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_point_on_hinge_stays_put() {
        let p = plane([1.0, 1.0, 1.0], -6.0);
        let on_hinge = Point3d::new(6.0, 0.0, 0.0);
        let r = unfold_point_on_plane(&p, &on_hinge).unwrap();
        assert_abs_diff_eq!(r, on_hinge, epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_plane_uses_canonical_side() {
        let p = plane([1.0, 1.0, 0.0], -2.0);
        let r = unfold_point_on_plane(&p, &Point3d::new(1.0, 1.0, 5.0)).unwrap();
        let off = 5.0 / 2.0_f64.sqrt();
        assert_abs_diff_eq!(r, Point3d::new(1.0 - off, 1.0 - off, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_steep_plane_keeps_sides_apart() {
        // Footprints sit 5e-5 either side of the hinge.
        let p = plane([1.0, 0.0, 1e-5], 0.0);
        let above = Point3d::new(-5e-5, 0.0, 5.0);
        let below = Point3d::new(5e-5, 0.0, -5.0);
        let a = unfold_point_on_plane(&p, &above).unwrap();
        let b = unfold_point_on_plane(&p, &below).unwrap();
        assert_abs_diff_eq!(a.distance_to(&b), above.distance_to(&below), epsilon = 1e-6);
    }

    #[test]
    fn test_point_off_plane_is_rejected() {
        let p = plane([0.0, 1.0, -1.0], 0.0);
        let err = unfold_point_on_plane(&p, &Point3d::new(2.0, 3.0, 4.0)).unwrap_err();
        assert!(matches!(err, KernelError::PointNotOnPlane { .. }));
    }

    #[test]
    fn test_hinge_matches_horizontal_trace() {
        let p = plane([2.0, -1.0, 3.0], 4.0);
        let trace = plane_traces(&p).horizontal.unwrap();
        let h = hinge(&p).unwrap().as_line();
        assert!(trace.contains(&h.point()));
        assert!(trace.contains(&h.at(10.0)));
    }

    #[test]
    fn test_unfold_many() {
        let p = plane([0.0, 1.0, -1.0], 0.0);
        let square = [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 1.0),
            Point3d::new(0.0, 1.0, 1.0),
        ];
        let flat = unfold_points_on_plane(&p, &square).unwrap();
        // True shape is a 1 x sqrt(2) rectangle.
        assert!((flat[0].distance_to(&flat[1]) - 1.0).abs() < 1e-9);
        assert!((flat[1].distance_to(&flat[2]) - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_unfold_many_fails_on_stray_point() {
        let p = plane([0.0, 1.0, -1.0], 0.0);
        let pts = [Point3d::ORIGIN, Point3d::new(0.0, 1.0, 2.0)];
        assert!(unfold_points_on_plane(&p, &pts).is_err());
    }

    #[test]
    fn test_fold_inverts_unfold() {
        let p = plane([1.0, -2.0, 0.5], 3.0);
        for seed in [Point3d::new(1.0, 2.0, 3.0), Point3d::new(-5.0, 0.5, -2.0)] {
            let point = p.project_point(&seed);
            let flat = unfold_point_on_plane(&p, &point).unwrap();
            let back = fold_point_onto_plane(&p, &flat).unwrap();
            assert_abs_diff_eq!(back, point, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fold_vertical_plane_returns_upper_point() {
        let p = plane([1.0, 1.0, 0.0], -2.0);
        let flat = unfold_point_on_plane(&p, &Point3d::new(1.0, 1.0, 5.0)).unwrap();
        let back = fold_point_onto_plane(&p, &flat).unwrap();
        assert_abs_diff_eq!(back, Point3d::new(1.0, 1.0, 5.0), epsilon = 1e-9);
    }

    #[test]
    fn test_fold_horizontal_plane_lifts_to_plane() {
        let p = plane([0.0, 0.0, 2.0], -8.0);
        let back = fold_point_onto_plane(&p, &Point3d::new(1.0, 2.0, 0.0)).unwrap();
        assert_eq!(back, Point3d::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn test_fold_requires_point_on_horizontal_plane() {
        let p = plane([0.0, 1.0, -1.0], 0.0);
        assert!(fold_point_onto_plane(&p, &Point3d::new(1.0, 1.0, 1.0)).is_err());
    }
}
