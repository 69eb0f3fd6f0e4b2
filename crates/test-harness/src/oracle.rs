//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle recomputes a kernel result by an independent route (plane
//! equations, nalgebra rotations and LU solves) and returns an
//! `OracleVerdict` with diagnostic detail instead of panicking, so a caller
//! can collect every failure in one pass.

use diedrico_kernel::intersection::{ThreePlanes, line_line, three_planes};
use diedrico_kernel::rotation::rotate_point_around_axis;
use diedrico_kernel::unfolding::{hinge, unfold_point_on_plane};
use diedrico_kernel::{Line, Plane, Point3d};
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use serde::Serialize;

/// The result of a single oracle check.
#[derive(Debug, Clone, Serialize)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }

    /// Pass or fail depending on whether `error` stays within `tol`.
    fn within(name: &str, error: f64, tol: f64, what: &str) -> Self {
        if error <= tol {
            Self::pass_val(name, format!("{} off by {:.3e} (tol={})", what, error, tol), error)
        } else {
            Self::fail_val(
                name,
                format!("{} off by {:.3e}, exceeds tol={}", what, error, tol),
                error,
            )
        }
    }
}

/// Collect the failing verdicts of a batch.
pub fn failures(verdicts: &[OracleVerdict]) -> Vec<&OracleVerdict> {
    verdicts.iter().filter(|v| !v.passed).collect()
}

// ── Incidence Oracles ───────────────────────────────────────────────────────

/// Check that a point satisfies `n . P + c = 0` within `tol`, measured as a
/// true (normalized) distance.
pub fn check_point_on_plane(point: &Point3d, plane: &Plane, tol: f64) -> OracleVerdict {
    let n = plane.normal();
    let raw = n.x * point.x + n.y * point.y + n.z * point.z + plane.constant();
    let distance = raw.abs() / n.length();
    OracleVerdict::within("point_on_plane", distance, tol, "plane equation")
}

/// Check that a point lies on a line, using `|(P - A) x d| / |d|`.
pub fn check_point_on_line(point: &Point3d, line: &Line, tol: f64) -> OracleVerdict {
    let d = line.direction();
    let distance = (*point - line.point()).cross(&d).length() / d.length();
    OracleVerdict::within("point_on_line", distance, tol, "distance to line")
}

/// Check that the meeting point of two lines, when reported, lies on both.
pub fn check_line_line_meeting(l1: &Line, l2: &Line, tol: f64) -> OracleVerdict {
    const NAME: &str = "line_line_meeting";
    let Some(p) = line_line(l1, l2) else {
        return OracleVerdict::pass(NAME, "lines reported as not meeting".to_string());
    };
    let worst = l1.distance_to_point(&p).max(l2.distance_to_point(&p));
    OracleVerdict::within(NAME, worst, tol, "meeting point")
}

// ── Construction Oracles ────────────────────────────────────────────────────

/// Check that unfolding keeps the true distance from the point to the hinge.
///
/// A horizontal plane has no hinge; the unfolded point must then be the
/// footprint.
pub fn check_unfold_radius(plane: &Plane, point: &Point3d, tol: f64) -> OracleVerdict {
    const NAME: &str = "unfold_radius";
    let unfolded = match unfold_point_on_plane(plane, point) {
        Ok(p) => p,
        Err(e) => return OracleVerdict::fail(NAME, format!("unfold rejected the point: {}", e)),
    };

    let Some(h) = hinge(plane) else {
        let gap = unfolded.distance_to(&Point3d::new(point.x, point.y, 0.0));
        return OracleVerdict::within(NAME, gap, tol, "footprint of horizontal plane");
    };

    let hinge_line = h.as_line();
    let before = hinge_line.distance_to_point(point);
    let after = hinge_line.distance_to_point(&unfolded);
    let error = (before - after).abs().max(unfolded.z.abs());
    OracleVerdict::within(NAME, error, tol, "radius about the hinge")
}

/// Check Rodrigues rotation against nalgebra's axis-angle rotation.
pub fn check_rotation_isometry(
    point: &Point3d,
    axis: &Line,
    angle_deg: f64,
    tol: f64,
) -> OracleVerdict {
    const NAME: &str = "rotation_isometry";
    let kernel = rotate_point_around_axis(point, axis, angle_deg);

    let u = Unit::new_normalize(Vector3::from(axis.direction()));
    let rotation = Rotation3::from_axis_angle(&u, angle_deg.to_radians());
    let anchor = Vector3::from(axis.point().to_vec3());
    let offset = Vector3::from(*point - axis.point());
    let reference = anchor + rotation * offset;

    let error = (Vector3::from(kernel.to_vec3()) - reference).norm();
    OracleVerdict::within(NAME, error, tol, "rotated point vs reference")
}

/// Check the three-plane solve against an LU factorization of the normal
/// matrix. A singular matrix must not produce a single point.
pub fn check_three_planes_lu(p1: &Plane, p2: &Plane, p3: &Plane, tol: f64) -> OracleVerdict {
    const NAME: &str = "three_planes_lu";
    let rows = [p1, p2, p3].map(|p| p.normal());
    let m = Matrix3::new(
        rows[0].x, rows[0].y, rows[0].z,
        rows[1].x, rows[1].y, rows[1].z,
        rows[2].x, rows[2].y, rows[2].z,
    );
    let rhs = Vector3::new(-p1.constant(), -p2.constant(), -p3.constant());

    let singular = m.determinant().abs() < diedrico_kernel::EPS_ZERO;
    let reference = if singular { None } else { m.lu().solve(&rhs) };

    match (three_planes(p1, p2, p3), reference) {
        (ThreePlanes::Point(p), Some(x)) => {
            let error = (Vector3::new(p.x, p.y, p.z) - x).norm();
            OracleVerdict::within(NAME, error, tol, "common point vs LU solution")
        }
        (ThreePlanes::Point(p), None) => OracleVerdict::fail(
            NAME,
            format!("singular system but kernel returned point {:?}", p),
        ),
        (other, Some(x)) => OracleVerdict::fail(
            NAME,
            format!("LU found ({:.4}, {:.4}, {:.4}) but kernel returned {:?}", x.x, x.y, x.z, other),
        ),
        (other, None) => {
            OracleVerdict::pass(NAME, format!("singular system, kernel returned {:?}", other))
        }
    }
}
