use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use super::vector::Vec3;

/// A point in 3D Euclidean space.
///
/// `x` runs along the ground line, `y` is the depth in front of the vertical
/// reference plane and `z` the height above the horizontal reference plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Orthogonal footprint on the horizontal reference plane.
    pub fn footprint(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    pub fn from_array([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Point displaced by a vector.
impl Add<Vec3> for Point3d {
    type Output = Point3d;
    fn add(self, rhs: Vec3) -> Self::Output {
        let v = self.to_vec3() + rhs;
        Point3d::new(v.x, v.y, v.z)
    }
}

/// Vector from `rhs` to `self`.
impl Sub for Point3d {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        self.to_vec3() - rhs.to_vec3()
    }
}

impl Sub<Vec3> for Point3d {
    type Output = Point3d;
    fn sub(self, rhs: Vec3) -> Self::Output {
        self + (-rhs)
    }
}

impl From<Point3d> for nalgebra::Point3<f64> {
    fn from(p: Point3d) -> Self {
        nalgebra::Point3::new(p.x, p.y, p.z)
    }
}

impl From<nalgebra::Point3<f64>> for Point3d {
    fn from(p: nalgebra::Point3<f64>) -> Self {
        Point3d::new(p.x, p.y, p.z)
    }
}

impl AbsDiffEq for Point3d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_vec3().abs_diff_eq(&other.to_vec3(), epsilon)
    }
}

impl RelativeEq for Point3d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_vec3()
            .relative_eq(&other.to_vec3(), epsilon, max_relative)
    }
}

/// A point in 2D space: a projection on one of the reference planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
