//! Textbook exercises with known answers, run through the kernel's query
//! dispatcher.
//!
//! A [`Scenario`] is one complete [`Query`] plus the [`Expected`] outcome.
//! [`run_scenario`] never panics; it reports a [`ScenarioOutcome`] so a whole
//! catalogue can be checked in one pass.

use diedrico_kernel::projection::Quadrant;
use diedrico_kernel::query::{Classification, Intersection};
use diedrico_kernel::traces::{LineKind, PlaneKind};
use diedrico_kernel::{Answer, EPS_COINCIDENT, Entity, Line, Point3d, Query, evaluate};
use serde::Serialize;

use crate::assertions::{assert_point_near, assert_same_line, assert_scalar_near};
use crate::helpers::{
    HarnessError, ground_line, line, line_entity, plane, plane_entity, point, point_entity,
};

/// What a scenario's answer must look like.
#[derive(Debug, Clone)]
pub enum Expected {
    /// A single point: rotation, unfolding, folding or a point intersection.
    Point(Point3d),
    /// A distance or an angle in degrees.
    Scalar(f64),
    /// An intersection line, compared as a point set.
    Line(Line),
    /// Piercing points of two lines through one plane.
    Pair(Option<Point3d>, Option<Point3d>),
    /// Traces of a line on the horizontal and vertical planes.
    Traces(Option<Point3d>, Option<Point3d>),
    /// No common element.
    Empty,
    PlaneKind(PlaneKind),
    LineKind(LineKind),
    Quadrant(Quadrant),
    /// The kernel must refuse the query.
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub query: Query,
    pub expected: Expected,
}

impl Scenario {
    pub fn new(name: &str, query: Query, expected: Expected) -> Self {
        Self {
            name: name.to_string(),
            query,
            expected,
        }
    }
}

/// The result of running a single scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl ScenarioOutcome {
    pub fn into_result(self) -> Result<(), HarnessError> {
        if self.passed {
            Ok(())
        } else {
            Err(HarnessError::ScenarioFailed {
                name: self.name,
                detail: self.detail,
            })
        }
    }
}

fn optional_point_near(
    actual: Option<Point3d>,
    expected: Option<Point3d>,
    ctx: &str,
) -> Result<(), HarnessError> {
    match (actual, expected) {
        (Some(a), Some(e)) => assert_point_near(&a, &e, EPS_COINCIDENT, ctx),
        (None, None) => Ok(()),
        (a, e) => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {:?}, got {:?}", ctx, e, a),
        }),
    }
}

fn mismatch(ctx: &str, expected: &Expected, answer: &Answer) -> HarnessError {
    HarnessError::AssertionFailed {
        detail: format!("[{}] expected {:?}, got {:?}", ctx, expected, answer),
    }
}

fn check_answer(ctx: &str, answer: &Answer, expected: &Expected) -> Result<(), HarnessError> {
    let tol = EPS_COINCIDENT;
    match (answer, expected) {
        (Answer::Point(p), Expected::Point(e))
        | (Answer::Intersection(Intersection::Point(p)), Expected::Point(e)) => {
            assert_point_near(p, e, tol, ctx)
        }
        (Answer::Distance(d), Expected::Scalar(e)) => assert_scalar_near(d.value, *e, tol, ctx),
        (Answer::Angle { degrees }, Expected::Scalar(e)) => {
            assert_scalar_near(*degrees, *e, tol, ctx)
        }
        (Answer::Intersection(Intersection::Line(l)), Expected::Line(e)) => {
            assert_same_line(l, e, tol, ctx)
        }
        (Answer::Intersection(Intersection::Pair { first, second }), Expected::Pair(e1, e2)) => {
            optional_point_near(*first, *e1, ctx)?;
            optional_point_near(*second, *e2, ctx)
        }
        (Answer::LineTraces(t), Expected::Traces(h, v)) => {
            optional_point_near(t.horizontal, *h, ctx)?;
            optional_point_near(t.vertical, *v, ctx)
        }
        (Answer::Intersection(Intersection::Empty), Expected::Empty) => Ok(()),
        (Answer::Classification(Classification::Plane { kind }), Expected::PlaneKind(e))
            if kind == e =>
        {
            Ok(())
        }
        (Answer::Classification(Classification::Line { kind }), Expected::LineKind(e))
            if kind == e =>
        {
            Ok(())
        }
        (Answer::Classification(Classification::Point { quadrant, .. }), Expected::Quadrant(e))
            if quadrant == e =>
        {
            Ok(())
        }
        _ => Err(mismatch(ctx, expected, answer)),
    }
}

/// Evaluate one scenario and compare its answer with the expectation.
pub fn run_scenario(scenario: &Scenario) -> ScenarioOutcome {
    let ctx = scenario.name.as_str();
    let checked = match (evaluate(&scenario.query), &scenario.expected) {
        (Err(_), Expected::Rejected) => Ok(()),
        (Err(e), _) => Err(HarnessError::Kernel(e)),
        (Ok(answer), Expected::Rejected) => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected rejection, got {:?}", ctx, answer),
        }),
        (Ok(answer), expected) => check_answer(ctx, &answer, expected),
    };

    match checked {
        Ok(()) => ScenarioOutcome {
            name: scenario.name.clone(),
            passed: true,
            detail: "ok".to_string(),
        },
        Err(e) => ScenarioOutcome {
            name: scenario.name.clone(),
            passed: false,
            detail: e.to_string(),
        },
    }
}

/// Run every scenario, keeping all outcomes.
pub fn run_catalogue(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    scenarios.iter().map(run_scenario).collect()
}

// ── Catalogue ───────────────────────────────────────────────────────────────

fn intersect(entities: Vec<Entity>) -> Query {
    Query::Intersect { entities }
}

/// Worked exercises of the dihedral system with their textbook answers.
pub fn catalogue() -> Result<Vec<Scenario>, HarnessError> {
    let sqrt2 = 2.0_f64.sqrt();
    let z0 = plane_entity([0.0, 0.0, 1.0], 0.0)?;
    let bisector = plane([0.0, 1.0, -1.0], 0.0)?;

    Ok(vec![
        // Intersections
        Scenario::new(
            "diagonal line meets plane z=10",
            intersect(vec![
                line_entity([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])?,
                plane_entity([0.0, 0.0, 1.0], -10.0)?,
            ]),
            Expected::Point(point(10.0, 10.0, 10.0)),
        ),
        Scenario::new(
            "crossing lines",
            intersect(vec![
                line_entity([0.0, 0.0, 0.0], [1.0, 0.0, 0.0])?,
                line_entity([5.0, -3.0, 0.0], [0.0, 1.0, 0.0])?,
            ]),
            Expected::Point(point(5.0, 0.0, 0.0)),
        ),
        Scenario::new(
            "parallel lines do not meet",
            intersect(vec![
                line_entity([0.0, 0.0, 0.0], [1.0, 2.0, 3.0])?,
                line_entity([0.0, 1.0, 0.0], [-2.0, -4.0, -6.0])?,
            ]),
            Expected::Empty,
        ),
        Scenario::new(
            "reference planes meet in the ground line",
            intersect(vec![z0.clone(), plane_entity([0.0, 1.0, 0.0], 0.0)?]),
            Expected::Line(ground_line()?),
        ),
        Scenario::new(
            "line lying on its plane",
            intersect(vec![
                line_entity([1.0, 2.0, 0.0], [1.0, -1.0, 0.0])?,
                z0.clone(),
            ]),
            Expected::Line(line([1.0, 2.0, 0.0], [1.0, -1.0, 0.0])?),
        ),
        Scenario::new(
            "coordinate planes meet at the origin",
            intersect(vec![
                plane_entity([1.0, 0.0, 0.0], 0.0)?,
                plane_entity([0.0, 1.0, 0.0], 0.0)?,
                z0.clone(),
            ]),
            Expected::Point(Point3d::ORIGIN),
        ),
        Scenario::new(
            "three concurrent lines",
            intersect(vec![
                line_entity([2.0, 0.0, 0.0], [1.0, 0.0, 0.0])?,
                line_entity([0.0, -4.0, 0.0], [0.0, 1.0, 0.0])?,
                line_entity([3.0, 3.0, 3.0], [1.0, 1.0, 1.0])?,
            ]),
            Expected::Point(Point3d::ORIGIN),
        ),
        Scenario::new(
            "line pierces the intersection of two planes",
            intersect(vec![
                plane_entity([1.0, 0.0, 0.0], -1.0)?,
                line_entity([0.0, 0.0, 3.0], [1.0, 2.0, 0.0])?,
                plane_entity([0.0, 1.0, 0.0], -2.0)?,
            ]),
            Expected::Point(point(1.0, 2.0, 3.0)),
        ),
        Scenario::new(
            "two lines through one plane",
            intersect(vec![
                line_entity([0.0, 0.0, 0.0], [0.0, 0.0, 1.0])?,
                line_entity([1.0, 1.0, 0.0], [1.0, 0.0, 0.0])?,
                plane_entity([0.0, 0.0, 1.0], -2.0)?,
            ]),
            Expected::Pair(Some(point(0.0, 0.0, 2.0)), None),
        ),
        Scenario::new(
            "point cannot be intersected",
            intersect(vec![point_entity(1.0, 2.0, 3.0), z0.clone()]),
            Expected::Rejected,
        ),
        // Traces
        Scenario::new(
            "traces of a rising line",
            Query::LineTraces {
                line: line([1.0, 2.0, 3.0], [0.0, 1.0, 1.0])?,
            },
            Expected::Traces(Some(point(1.0, -1.0, 0.0)), Some(point(1.0, 0.0, 1.0))),
        ),
        // Distances
        Scenario::new(
            "distance between two points",
            Query::Distance {
                a: point_entity(0.0, 0.0, 0.0),
                b: point_entity(10.0, 0.0, 0.0),
            },
            Expected::Scalar(10.0),
        ),
        Scenario::new(
            "height of a point over the horizontal plane",
            Query::Distance {
                a: point_entity(0.0, 0.0, 5.0),
                b: z0.clone(),
            },
            Expected::Scalar(5.0),
        ),
        Scenario::new(
            "distance between skew lines",
            Query::Distance {
                a: line_entity([0.0, 0.0, 0.0], [1.0, 0.0, 0.0])?,
                b: line_entity([3.0, 0.0, 5.0], [0.0, 1.0, 0.0])?,
            },
            Expected::Scalar(5.0),
        ),
        Scenario::new(
            "distance between parallel planes",
            Query::Distance {
                a: z0.clone(),
                b: plane_entity([0.0, 0.0, -2.0], 14.0)?,
            },
            Expected::Scalar(7.0),
        ),
        // Angles
        Scenario::new(
            "bisector plane against the horizontal plane",
            Query::Angle {
                a: z0.clone(),
                b: Entity::Plane(bisector),
            },
            Expected::Scalar(45.0),
        ),
        Scenario::new(
            "line inclined at 45 degrees",
            Query::Angle {
                a: line_entity([0.0, 0.0, 0.0], [1.0, 0.0, 1.0])?,
                b: z0.clone(),
            },
            Expected::Scalar(45.0),
        ),
        Scenario::new(
            "angle needs lines or planes",
            Query::Angle {
                a: point_entity(0.0, 0.0, 0.0),
                b: line_entity([0.0, 0.0, 0.0], [1.0, 0.0, 0.0])?,
            },
            Expected::Rejected,
        ),
        // Classification
        Scenario::new(
            "bisector plane contains the ground line",
            Query::Classify {
                entity: Entity::Plane(bisector),
            },
            Expected::PlaneKind(PlaneKind::ContainsGroundLine),
        ),
        Scenario::new(
            "vertical line",
            Query::Classify {
                entity: line_entity([4.0, 2.0, 0.0], [0.0, 0.0, -3.0])?,
            },
            Expected::LineKind(LineKind::Vertical),
        ),
        Scenario::new(
            "point behind and above",
            Query::Classify {
                entity: point_entity(3.0, -2.0, 4.0),
            },
            Expected::Quadrant(Quadrant::Second),
        ),
        // Rotation, unfolding and folding
        Scenario::new(
            "quarter turn about the vertical axis",
            Query::Rotate {
                point: point(1.0, 0.0, 0.0),
                axis: line([0.0, 0.0, 0.0], [0.0, 0.0, 1.0])?,
                angle_deg: 90.0,
            },
            Expected::Point(point(0.0, 1.0, 0.0)),
        ),
        Scenario::new(
            "unfold a point of the bisector plane",
            Query::Unfold {
                plane: bisector,
                point: point(2.0, 3.0, 3.0),
            },
            Expected::Point(point(2.0, 3.0 * sqrt2, 0.0)),
        ),
        Scenario::new(
            "fold it back",
            Query::Fold {
                plane: bisector,
                point: point(2.0, 3.0 * sqrt2, 0.0),
            },
            Expected::Point(point(2.0, 3.0, 3.0)),
        ),
        Scenario::new(
            "unfolding needs a point on the plane",
            Query::Unfold {
                plane: bisector,
                point: point(2.0, 3.0, 4.0),
            },
            Expected::Rejected,
        ),
    ])
}
