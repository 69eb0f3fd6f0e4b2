//! Analytic-geometry kernel for descriptive geometry in the dihedral
//! (Monge) system.
//!
//! Every operation is a pure function over value entities: points, lines and
//! planes in 3D. The horizontal reference plane is `z = 0`, the vertical
//! reference plane is `y = 0` and the ground line is the x-axis.

pub mod angle;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod projection;
pub mod query;
pub mod rotation;
pub mod traces;
pub mod unfolding;

pub use error::KernelError;
pub use geometry::entity::{Entity, EntityKind};
pub use geometry::line::Line;
pub use geometry::plane::Plane;
pub use geometry::point::{Point2d, Point3d};
pub use geometry::vector::Vec3;
pub use query::{Answer, Query, evaluate};

/// Near-zero threshold for magnitude-class checks: parallelism, vanishing
/// normal or direction components, singular determinants.
pub const EPS_ZERO: f64 = 1e-6;

/// Positional threshold: points closer than this are coincident and a point
/// whose signed distance to a plane is below it lies on the plane.
pub const EPS_COINCIDENT: f64 = 1e-4;

/// Tolerance pair shared by every kernel check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Magnitude threshold (parallelism, vanishing components).
    pub zero: f64,
    /// Position threshold (coincidence, containment).
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::KERNEL
    }
}

impl Tolerance {
    /// The fixed pair used by the kernel itself.
    pub const KERNEL: Self = Self {
        zero: EPS_ZERO,
        coincidence: EPS_COINCIDENT,
    };

    pub fn is_zero(&self, magnitude: f64) -> bool {
        magnitude.abs() < self.zero
    }

    pub fn is_coincident(&self, distance: f64) -> bool {
        distance.abs() < self.coincidence
    }

    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }
}

pub(crate) fn is_zero(magnitude: f64) -> bool {
    Tolerance::KERNEL.is_zero(magnitude)
}

pub(crate) fn is_coincident(distance: f64) -> bool {
    Tolerance::KERNEL.is_coincident(distance)
}
