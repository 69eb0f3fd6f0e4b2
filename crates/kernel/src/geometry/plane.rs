use serde::{Deserialize, Serialize};

use super::line::Line;
use super::point::Point3d;
use super::vector::Vec3;
use crate::error::KernelError;
use crate::intersection::{LineLineRelation, line_line_relation};

/// A plane `normal . P + constant = 0`.
///
/// The normal is stored as given (not normalized); only a (near) zero normal
/// is rejected. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlane", into = "RawPlane")]
pub struct Plane {
    normal: Vec3,
    constant: f64,
}

#[derive(Serialize, Deserialize)]
struct RawPlane {
    normal: Vec3,
    constant: f64,
}

impl TryFrom<RawPlane> for Plane {
    type Error = KernelError;

    fn try_from(raw: RawPlane) -> Result<Self, Self::Error> {
        Plane::new(raw.normal, raw.constant)
    }
}

impl From<Plane> for RawPlane {
    fn from(plane: Plane) -> Self {
        RawPlane {
            normal: plane.normal,
            constant: plane.constant,
        }
    }
}

impl Plane {
    /// The horizontal reference plane `z = 0`.
    pub const HORIZONTAL: Self = Self {
        normal: Vec3::Z,
        constant: 0.0,
    };

    /// The vertical reference plane `y = 0`.
    pub const VERTICAL: Self = Self {
        normal: Vec3::Y,
        constant: 0.0,
    };

    pub fn new(normal: Vec3, constant: f64) -> Result<Self, KernelError> {
        if !normal.is_finite() {
            return Err(KernelError::NonFinite {
                what: "plane normal",
            });
        }
        if !constant.is_finite() {
            return Err(KernelError::NonFinite {
                what: "plane constant",
            });
        }
        if crate::is_zero(normal.length()) {
            return Err(KernelError::ZeroNormal);
        }
        Ok(Self { normal, constant })
    }

    pub fn from_point_normal(point: Point3d, normal: Vec3) -> Result<Self, KernelError> {
        if !point.is_finite() {
            return Err(KernelError::NonFinite {
                what: "plane point",
            });
        }
        Self::new(normal, -normal.dot(&point.to_vec3()))
    }

    pub fn through_points(a: Point3d, b: Point3d, c: Point3d) -> Result<Self, KernelError> {
        let normal = (b - a).cross(&(c - a));
        if normal.is_finite() && crate::is_zero(normal.length()) {
            return Err(KernelError::CollinearPoints);
        }
        Self::from_point_normal(a, normal)
    }

    /// Plane through `point` spanned by two non-parallel directions.
    pub fn from_point_and_directions(
        point: Point3d,
        d1: Vec3,
        d2: Vec3,
    ) -> Result<Self, KernelError> {
        let normal = d1.cross(&d2);
        if normal.is_finite() && crate::is_zero(normal.length()) {
            return Err(KernelError::ParallelDirections);
        }
        Self::from_point_normal(point, normal)
    }

    /// Plane holding two intersecting or two distinct parallel lines.
    pub fn containing_lines(l1: &Line, l2: &Line) -> Result<Self, KernelError> {
        match line_line_relation(l1, l2) {
            LineLineRelation::Intersecting(p) => {
                Self::from_point_normal(p, l1.direction().cross(&l2.direction()))
            }
            LineLineRelation::Parallel => Self::from_point_normal(
                l1.point(),
                l1.direction().cross(&(l2.point() - l1.point())),
            ),
            LineLineRelation::Coincident | LineLineRelation::Skew => {
                Err(KernelError::NonCoplanarLines)
            }
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn unit_normal(&self) -> Vec3 {
        self.normal.normalize()
    }

    /// Left-hand side of the plane equation, `normal . p + constant`.
    pub fn signed_value(&self, p: &Point3d) -> f64 {
        self.normal.dot(&p.to_vec3()) + self.constant
    }

    /// Signed Euclidean distance, positive on the side the normal points to.
    pub fn signed_distance(&self, p: &Point3d) -> f64 {
        self.signed_value(p) / self.normal.length()
    }

    pub fn contains(&self, p: &Point3d) -> bool {
        crate::is_coincident(self.signed_distance(p))
    }

    pub fn project_point(&self, p: &Point3d) -> Point3d {
        *p - self.normal * (self.signed_value(p) / self.normal.length_squared())
    }

    /// The point of the plane closest to the origin.
    pub fn anchor(&self) -> Point3d {
        self.project_point(&Point3d::ORIGIN)
    }

    pub fn is_parallel_to(&self, other: &Plane) -> bool {
        crate::is_zero(self.normal.cross(&other.normal).length())
    }

    /// Same point set, whatever the scale or sign of the equations.
    pub fn coincides_with(&self, other: &Plane) -> bool {
        self.is_parallel_to(other) && other.contains(&self.anchor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_normal_rejected() {
        assert_eq!(Plane::new(Vec3::ZERO, 1.0).unwrap_err(), KernelError::ZeroNormal);
    }

    #[test]
    fn test_from_point_normal() {
        let p = Plane::from_point_normal(Point3d::new(0.0, 0.0, 10.0), Vec3::Z).unwrap();
        assert!((p.constant() + 10.0).abs() < 1e-12);
        assert!(p.contains(&Point3d::new(-4.0, 7.0, 10.0)));
    }

    #[test]
    fn test_through_points() {
        let p = Plane::through_points(
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            Point3d::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert!(p.contains(&Point3d::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)));
        assert!(!p.contains(&Point3d::ORIGIN));
    }

    #[test]
    fn test_collinear_points_rejected() {
        let err = Plane::through_points(
            Point3d::ORIGIN,
            Point3d::new(1.0, 1.0, 1.0),
            Point3d::new(2.0, 2.0, 2.0),
        )
        .unwrap_err();
        assert_eq!(err, KernelError::CollinearPoints);
    }

    #[test]
    fn test_from_point_and_directions() {
        let p = Plane::from_point_and_directions(
            Point3d::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 2.0, 0.0),
        )
        .unwrap();
        assert!(p.contains(&Point3d::new(1.0, 2.0, 3.0)));
        assert!(p.contains(&Point3d::new(3.0, -4.0, 5.0)));
        assert!(!p.contains(&Point3d::new(1.0, 2.0, 4.0)));
    }

    #[test]
    fn test_parallel_directions_rejected() {
        let err = Plane::from_point_and_directions(
            Point3d::ORIGIN,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-2.0, -4.0, -6.0),
        )
        .unwrap_err();
        assert_eq!(err, KernelError::ParallelDirections);
    }

    #[test]
    fn test_signed_distance_and_projection() {
        let p = Plane::new(Vec3::new(0.0, 0.0, 2.0), -4.0).unwrap();
        let q = Point3d::new(1.0, 1.0, 5.0);
        assert!((p.signed_distance(&q) - 3.0).abs() < 1e-12);
        assert_abs_diff_eq!(p.project_point(&q), Point3d::new(1.0, 1.0, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(p.anchor(), Point3d::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_containing_intersecting_lines() {
        let l1 = Line::new(Point3d::new(0.0, 0.0, 3.0), Vec3::X).unwrap();
        let l2 = Line::new(Point3d::new(0.0, 0.0, 3.0), Vec3::Y).unwrap();
        let p = Plane::containing_lines(&l1, &l2).unwrap();
        assert!(p.coincides_with(&Plane::new(Vec3::new(0.0, 0.0, -5.0), 15.0).unwrap()));
    }

    #[test]
    fn test_containing_parallel_lines() {
        let l1 = Line::new(Point3d::ORIGIN, Vec3::X).unwrap();
        let l2 = Line::new(Point3d::new(0.0, 2.0, 2.0), Vec3::new(-3.0, 0.0, 0.0)).unwrap();
        let p = Plane::containing_lines(&l1, &l2).unwrap();
        assert!(p.contains(&Point3d::new(5.0, 1.0, 1.0)));
    }

    #[test]
    fn test_containing_skew_lines_rejected() {
        let l1 = Line::new(Point3d::ORIGIN, Vec3::X).unwrap();
        let l2 = Line::new(Point3d::new(0.0, 0.0, 1.0), Vec3::Y).unwrap();
        assert_eq!(
            Plane::containing_lines(&l1, &l2).unwrap_err(),
            KernelError::NonCoplanarLines
        );
    }

    #[test]
    fn test_deserialize_validates_normal() {
        let bad = serde_json::from_str::<Plane>(
            r#"{"normal":{"x":0.0,"y":0.0,"z":0.0},"constant":3.0}"#,
        );
        assert!(bad.is_err());
    }
}
