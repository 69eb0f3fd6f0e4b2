//! Helper functions: error type and entity constructors.

use diedrico_kernel::{Entity, KernelError, Line, Plane, Point3d, Vec3};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("scenario {name} failed: {detail}")]
    ScenarioFailed { name: String, detail: String },
}

// ── Entity Constructors ─────────────────────────────────────────────────────

pub fn point(x: f64, y: f64, z: f64) -> Point3d {
    Point3d::new(x, y, z)
}

/// Line through `p` with direction `d`.
pub fn line(p: [f64; 3], d: [f64; 3]) -> Result<Line, HarnessError> {
    Ok(Line::new(Point3d::from_array(p), Vec3::from_array(d))?)
}

/// Plane `n . X + c = 0`.
pub fn plane(n: [f64; 3], c: f64) -> Result<Plane, HarnessError> {
    Ok(Plane::new(Vec3::from_array(n), c)?)
}

pub fn point_entity(x: f64, y: f64, z: f64) -> Entity {
    Entity::Point(point(x, y, z))
}

pub fn line_entity(p: [f64; 3], d: [f64; 3]) -> Result<Entity, HarnessError> {
    line(p, d).map(Entity::Line)
}

pub fn plane_entity(n: [f64; 3], c: f64) -> Result<Entity, HarnessError> {
    plane(n, c).map(Entity::Plane)
}

/// The ground line: intersection of the two reference planes.
pub fn ground_line() -> Result<Line, HarnessError> {
    Ok(Line::new(Point3d::ORIGIN, Vec3::X)?)
}
