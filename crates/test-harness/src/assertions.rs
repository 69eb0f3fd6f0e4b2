//! Tolerance-aware assertion helpers with diagnostic output.
//!
//! Every failure names the context, the expected and the actual value, and
//! the tolerance that was exceeded.

use diedrico_kernel::{Line, Plane, Point3d};

use crate::helpers::HarnessError;

/// Assert two scalars agree within `tol`.
pub fn assert_scalar_near(actual: f64, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {:.6}, got {:.6} (tol={})",
                ctx, expected, actual, tol,
            ),
        })
    }
}

/// Assert two points are within `tol` of each other.
pub fn assert_point_near(
    actual: &Point3d,
    expected: &Point3d,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let gap = actual.distance_to(expected);
    if gap <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected ({:.4}, {:.4}, {:.4}), got ({:.4}, {:.4}, {:.4}), off by {:.3e} (tol={})",
                ctx, expected.x, expected.y, expected.z, actual.x, actual.y, actual.z, gap, tol,
            ),
        })
    }
}

/// Assert a point satisfies a plane's equation.
pub fn assert_on_plane(point: &Point3d, plane: &Plane, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let distance = plane.signed_distance(point);
    if distance.abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] point ({:.4}, {:.4}, {:.4}) is {:.3e} away from the plane (tol={})",
                ctx, point.x, point.y, point.z, distance, tol,
            ),
        })
    }
}

/// Assert a point lies on a line.
pub fn assert_on_line(point: &Point3d, line: &Line, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let distance = line.distance_to_point(point);
    if distance <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] point ({:.4}, {:.4}, {:.4}) is {:.3e} away from the line (tol={})",
                ctx, point.x, point.y, point.z, distance, tol,
            ),
        })
    }
}

/// Assert two lines describe the same set of points, regardless of the
/// anchor point or the length and sense of the direction.
pub fn assert_same_line(actual: &Line, expected: &Line, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let sine = actual
        .unit_direction()
        .cross(&expected.unit_direction())
        .length();
    if sine > tol {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] directions differ: {:?} vs {:?} (sin={:.3e}, tol={})",
                ctx,
                actual.direction(),
                expected.direction(),
                sine,
                tol,
            ),
        });
    }
    assert_on_line(&actual.point(), expected, tol, ctx)
}
