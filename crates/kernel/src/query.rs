//! Request/response entry point over [`Entity`] values.
//!
//! A caller builds one complete [`Query`] (for instance the three planes of a
//! three-plane intersection) and gets one [`Answer`] back. Dispatch is an
//! exhaustive match on entity kinds, so there is no partial or re-entrant
//! state anywhere in the kernel.

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::angle::{angle_line_line, angle_line_plane, angle_plane_plane};
use crate::distance::{
    Distance, distance_line_plane, distance_plane_plane, distance_point_line,
    distance_point_plane, distance_point_point, distance_skew_lines,
};
use crate::error::KernelError;
use crate::geometry::entity::{Entity, describe_kinds};
use crate::geometry::line::Line;
use crate::geometry::plane::Plane;
use crate::geometry::point::Point3d;
use crate::intersection::{
    LineLineRelation, LinePlaneRelation, ThreePlanes, line_line_relation, line_plane_relation,
    plane_plane, three_lines, three_planes, two_lines_one_plane, two_planes_one_line,
};
use crate::projection::{DihedralProjection, Quadrant, project, quadrant};
use crate::rotation::rotate_point_around_axis;
use crate::traces::{
    LineKind, LineTraces, PlaneKind, PlaneTraces, classify_line, classify_plane, line_traces,
    plane_traces,
};
use crate::unfolding::{fold_point_onto_plane, unfold_point_on_plane};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    LineTraces { line: Line },
    PlaneTraces { plane: Plane },
    Classify { entity: Entity },
    Intersect { entities: Vec<Entity> },
    Distance { a: Entity, b: Entity },
    Angle { a: Entity, b: Entity },
    Rotate { point: Point3d, axis: Line, angle_deg: f64 },
    Unfold { plane: Plane, point: Point3d },
    Fold { plane: Plane, point: Point3d },
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Query::LineTraces { .. } => "line_traces",
            Query::PlaneTraces { .. } => "plane_traces",
            Query::Classify { .. } => "classify",
            Query::Intersect { .. } => "intersect",
            Query::Distance { .. } => "distance",
            Query::Angle { .. } => "angle",
            Query::Rotate { .. } => "rotate",
            Query::Unfold { .. } => "unfold",
            Query::Fold { .. } => "fold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Answer {
    LineTraces(LineTraces),
    PlaneTraces(PlaneTraces),
    Classification(Classification),
    Intersection(Intersection),
    Distance(Distance),
    Angle { degrees: f64 },
    Point(Point3d),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum Classification {
    Point {
        projection: DihedralProjection,
        quadrant: Quadrant,
    },
    Line { kind: LineKind },
    Plane { kind: PlaneKind },
}

/// Common part of a set of entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Intersection {
    Point(Point3d),
    Line(Line),
    Plane(Plane),
    /// Two lines against one plane: each line pierces it independently.
    Pair {
        first: Option<Point3d>,
        second: Option<Point3d>,
    },
    Empty,
}

#[instrument(level = "debug", skip_all, fields(query = query.name()))]
pub fn evaluate(query: &Query) -> Result<Answer, KernelError> {
    let answer = match query {
        Query::LineTraces { line } => Answer::LineTraces(line_traces(line)),
        Query::PlaneTraces { plane } => Answer::PlaneTraces(plane_traces(plane)),
        Query::Classify { entity } => Answer::Classification(classify(entity)),
        Query::Intersect { entities } => Answer::Intersection(intersect(entities)?),
        Query::Distance { a, b } => Answer::Distance(distance(a, b)),
        Query::Angle { a, b } => Answer::Angle {
            degrees: angle(a, b)?,
        },
        Query::Rotate {
            point,
            axis,
            angle_deg,
        } => Answer::Point(rotate_point_around_axis(point, axis, *angle_deg)),
        Query::Unfold { plane, point } => Answer::Point(unfold_point_on_plane(plane, point)?),
        Query::Fold { plane, point } => Answer::Point(fold_point_onto_plane(plane, point)?),
    };
    Ok(answer)
}

pub fn classify(entity: &Entity) -> Classification {
    match entity {
        Entity::Point(p) => Classification::Point {
            projection: project(p),
            quadrant: quadrant(p),
        },
        Entity::Line(l) => Classification::Line {
            kind: classify_line(l),
        },
        Entity::Plane(p) => Classification::Plane {
            kind: classify_plane(p),
        },
    }
}

fn from_line_pair(l1: &Line, l2: &Line) -> Intersection {
    match line_line_relation(l1, l2) {
        LineLineRelation::Intersecting(p) => Intersection::Point(p),
        LineLineRelation::Coincident => Intersection::Line(*l1),
        relation @ (LineLineRelation::Parallel | LineLineRelation::Skew) => {
            trace!(?relation, "lines do not meet");
            Intersection::Empty
        }
    }
}

fn from_line_plane(line: &Line, plane: &Plane) -> Intersection {
    match line_plane_relation(line, plane) {
        LinePlaneRelation::Point(p) => Intersection::Point(p),
        LinePlaneRelation::Contained => Intersection::Line(*line),
        LinePlaneRelation::Parallel => {
            trace!("line parallel to plane");
            Intersection::Empty
        }
    }
}

fn from_plane_pair(p1: &Plane, p2: &Plane) -> Intersection {
    match plane_plane(p1, p2) {
        Some(line) => Intersection::Line(line),
        None if p1.coincides_with(p2) => Intersection::Plane(*p1),
        None => {
            trace!("planes are parallel");
            Intersection::Empty
        }
    }
}

fn from_option(point: Option<Point3d>) -> Intersection {
    point.map_or(Intersection::Empty, Intersection::Point)
}

/// Intersection of two or three entities of any order.
pub fn intersect(entities: &[Entity]) -> Result<Intersection, KernelError> {
    use Entity::{Line as L, Plane as P};

    let result = match entities {
        [L(a), L(b)] => from_line_pair(a, b),
        [L(l), P(p)] | [P(p), L(l)] => from_line_plane(l, p),
        [P(a), P(b)] => from_plane_pair(a, b),

        [P(a), P(b), P(c)] => match three_planes(a, b, c) {
            ThreePlanes::Point(p) => Intersection::Point(p),
            ThreePlanes::Line(l) => Intersection::Line(l),
            ThreePlanes::None => Intersection::Empty,
        },
        [L(a), L(b), L(c)] => from_option(three_lines(a, b, c)),

        [P(a), P(b), L(l)] | [P(a), L(l), P(b)] | [L(l), P(a), P(b)] => {
            from_option(two_planes_one_line(a, b, l))
        }

        [L(a), L(b), P(p)] | [L(a), P(p), L(b)] | [P(p), L(a), L(b)] => {
            let hits = two_lines_one_plane(a, b, p);
            Intersection::Pair {
                first: hits.first,
                second: hits.second,
            }
        }

        _ => {
            return Err(KernelError::UnsupportedCombination {
                description: format!("intersection of [{}]", describe_kinds(entities)),
            });
        }
    };
    Ok(result)
}

/// Distance between any two entities.
pub fn distance(a: &Entity, b: &Entity) -> Distance {
    use Entity::{Line as L, Plane as P, Point as Pt};

    match (a, b) {
        (Pt(p), Pt(q)) => distance_point_point(p, q),
        (Pt(p), L(l)) => distance_point_line(p, l),
        (L(l), Pt(p)) => distance_point_line(p, l).swapped(),
        (Pt(p), P(pl)) => distance_point_plane(p, pl),
        (P(pl), Pt(p)) => distance_point_plane(p, pl).swapped(),
        (L(l1), L(l2)) => distance_skew_lines(l1, l2),
        (L(l), P(pl)) => distance_line_plane(l, pl),
        (P(pl), L(l)) => distance_line_plane(l, pl).swapped(),
        (P(p1), P(p2)) => distance_plane_plane(p1, p2),
    }
}

/// Angle in degrees between two lines or planes.
pub fn angle(a: &Entity, b: &Entity) -> Result<f64, KernelError> {
    use Entity::{Line as L, Plane as P, Point as Pt};

    match (a, b) {
        (L(l1), L(l2)) => Ok(angle_line_line(l1, l2)),
        (L(l), P(p)) | (P(p), L(l)) => Ok(angle_line_plane(l, p)),
        (P(p1), P(p2)) => Ok(angle_plane_plane(p1, p2)),
        (Pt(_), _) | (_, Pt(_)) => Err(KernelError::UnsupportedCombination {
            description: format!("angle between {} and {}", a.kind(), b.kind()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vector::Vec3;
    use approx::assert_abs_diff_eq;

    fn line(p: [f64; 3], d: [f64; 3]) -> Entity {
        Entity::Line(Line::new(Point3d::from_array(p), Vec3::from_array(d)).unwrap())
    }

    fn plane(n: [f64; 3], c: f64) -> Entity {
        Entity::Plane(Plane::new(Vec3::from_array(n), c).unwrap())
    }

    #[test]
    fn test_line_plane_in_either_order() {
        let l = line([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let p = plane([0.0, 0.0, 1.0], -10.0);
        for entities in [vec![l, p], vec![p, l]] {
            match intersect(&entities).unwrap() {
                Intersection::Point(q) => {
                    assert_abs_diff_eq!(q, Point3d::new(10.0, 10.0, 10.0), epsilon = 1e-9)
                }
                other => panic!("expected a point, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_coincident_planes_intersect_in_plane() {
        let a = plane([0.0, 0.0, 1.0], -1.0);
        let b = plane([0.0, 0.0, -3.0], 3.0);
        assert!(matches!(intersect(&[a, b]).unwrap(), Intersection::Plane(_)));
        let c = plane([0.0, 0.0, 1.0], -2.0);
        assert_eq!(intersect(&[a, c]).unwrap(), Intersection::Empty);
    }

    #[test]
    fn test_two_planes_one_line_any_position() {
        let a = plane([1.0, 0.0, 0.0], -1.0);
        let b = plane([0.0, 1.0, 0.0], -2.0);
        let l = line([0.0, 2.0, 5.0], [1.0, 0.0, 0.0]);
        for entities in [[a, b, l], [a, l, b], [l, a, b]] {
            match intersect(&entities).unwrap() {
                Intersection::Point(q) => {
                    assert_abs_diff_eq!(q, Point3d::new(1.0, 2.0, 5.0), epsilon = 1e-9)
                }
                other => panic!("expected a point, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_two_lines_one_plane_pair() {
        let p = plane([0.0, 0.0, 1.0], 0.0);
        let a = line([1.0, 1.0, 1.0], [0.0, 0.0, 1.0]);
        let b = line([0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        match intersect(&[a, p, b]).unwrap() {
            Intersection::Pair { first, second } => {
                assert!(first.is_some());
                assert!(second.is_none());
            }
            other => panic!("expected a pair, got {other:?}"),
        }
    }

    #[test]
    fn test_points_cannot_be_intersected() {
        let err = intersect(&[Entity::Point(Point3d::ORIGIN), Entity::Point(Point3d::ORIGIN)])
            .unwrap_err();
        assert_eq!(
            err,
            KernelError::UnsupportedCombination {
                description: "intersection of [point, point]".to_string()
            }
        );
        assert!(intersect(&[plane([0.0, 0.0, 1.0], 0.0)]).is_err());
    }

    #[test]
    fn test_distance_swaps_closest_points() {
        let p = Entity::Point(Point3d::new(0.0, 0.0, 5.0));
        let h = Entity::Plane(Plane::HORIZONTAL);
        let d = distance(&h, &p);
        assert!((d.value - 5.0).abs() < 1e-12);
        let (on_plane, point) = d.closest.unwrap();
        assert_abs_diff_eq!(on_plane, Point3d::ORIGIN, epsilon = 1e-12);
        assert_abs_diff_eq!(point, Point3d::new(0.0, 0.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_angle_with_point_is_rejected() {
        let err = angle(&Entity::Point(Point3d::ORIGIN), &plane([0.0, 0.0, 1.0], 0.0)).unwrap_err();
        assert!(matches!(err, KernelError::UnsupportedCombination { .. }));
    }

    #[test]
    fn test_evaluate_rotation_query() {
        let query = Query::Rotate {
            point: Point3d::new(1.0, 0.0, 0.0),
            axis: Line::new(Point3d::ORIGIN, Vec3::Z).unwrap(),
            angle_deg: 90.0,
        };
        match evaluate(&query).unwrap() {
            Answer::Point(p) => assert_abs_diff_eq!(p, Point3d::new(0.0, 1.0, 0.0), epsilon = 1e-9),
            other => panic!("unexpected answer {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_unfold_propagates_invalid_input() {
        let query = Query::Unfold {
            plane: Plane::HORIZONTAL,
            point: Point3d::new(0.0, 0.0, 1.0),
        };
        assert!(matches!(
            evaluate(&query),
            Err(KernelError::PointNotOnPlane { .. })
        ));
    }

    #[test]
    fn test_classify_point() {
        match classify(&Entity::Point(Point3d::new(1.0, -2.0, 3.0))) {
            Classification::Point { quadrant, projection } => {
                assert_eq!(quadrant, Quadrant::Second);
                assert_eq!(projection.height, 3.0);
            }
            other => panic!("unexpected classification {other:?}"),
        }
    }

    #[test]
    fn test_query_json_shape() {
        let json = r#"{
            "type": "intersect",
            "entities": [
                {"kind": "plane", "normal": {"x": 1.0, "y": 0.0, "z": 0.0}, "constant": 0.0},
                {"kind": "plane", "normal": {"x": 0.0, "y": 1.0, "z": 0.0}, "constant": 0.0},
                {"kind": "plane", "normal": {"x": 0.0, "y": 0.0, "z": 1.0}, "constant": 0.0}
            ]
        }"#;
        let query: Query = serde_json::from_str(json).unwrap();
        assert_eq!(query.name(), "intersect");
        match evaluate(&query).unwrap() {
            Answer::Intersection(Intersection::Point(p)) => {
                assert_abs_diff_eq!(p, Point3d::ORIGIN, epsilon = 1e-12)
            }
            other => panic!("unexpected answer {other:?}"),
        }
    }

    #[test]
    fn test_every_answer_survives_json() {
        let p = Point3d::new(1.5, -2.0, 0.25);
        let q = Point3d::new(4.0, 0.5, -8.0);
        let l = Line::new(p, Vec3::new(0.0, 1.0, 1.0)).unwrap();
        let answers = vec![
            Answer::LineTraces(LineTraces {
                horizontal: Some(p),
                vertical: None,
            }),
            Answer::PlaneTraces(PlaneTraces {
                horizontal: Some(l),
                vertical: None,
            }),
            Answer::Classification(Classification::Point {
                projection: project(&p),
                quadrant: Quadrant::Fourth,
            }),
            Answer::Classification(Classification::Line {
                kind: LineKind::Profile,
            }),
            Answer::Classification(Classification::Plane {
                kind: PlaneKind::ContainsGroundLine,
            }),
            Answer::Intersection(Intersection::Point(q)),
            Answer::Intersection(Intersection::Line(l)),
            Answer::Intersection(Intersection::Plane(Plane::HORIZONTAL)),
            Answer::Intersection(Intersection::Pair {
                first: Some(p),
                second: None,
            }),
            Answer::Intersection(Intersection::Empty),
            Answer::Distance(Distance {
                value: 2.5,
                closest: Some((p, q)),
            }),
            Answer::Distance(Distance {
                value: 0.0,
                closest: None,
            }),
            Answer::Angle { degrees: 45.0 },
            Answer::Point(q),
        ];

        for answer in answers {
            let json = serde_json::to_string(&answer).unwrap();
            let back: Answer = serde_json::from_str(&json).unwrap();
            assert_eq!(back, answer, "through {json}");
        }
    }

    #[test]
    fn test_classification_json_names_entity() {
        let json = serde_json::to_value(Classification::Plane {
            kind: PlaneKind::Oblique,
        })
        .unwrap();
        assert_eq!(json["entity"], "plane");
        assert_eq!(json["kind"], "oblique");
    }
}
