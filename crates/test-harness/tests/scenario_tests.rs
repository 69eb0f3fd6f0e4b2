//! Runs the textbook catalogue end to end through the query dispatcher.

use diedrico_harness::helpers::{line, line_entity, plane_entity, point, point_entity};
use diedrico_harness::scenarios::catalogue;
use diedrico_harness::{Expected, Scenario, run_catalogue, run_scenario};
use diedrico_kernel::{Answer, Query, evaluate};

#[test]
fn full_catalogue_passes() {
    let scenarios = catalogue().expect("catalogue entities are valid");
    assert!(scenarios.len() >= 20);

    let outcomes = run_catalogue(&scenarios);
    let failed: Vec<_> = outcomes.iter().filter(|o| !o.passed).collect();
    assert!(failed.is_empty(), "failing scenarios: {:#?}", failed);
}

#[test]
fn scenario_names_are_unique() {
    let scenarios = catalogue().unwrap();
    let mut names: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(before, names.len());
}

#[test]
fn line_meets_plane_z10() {
    let s = Scenario::new(
        "line (0,0,0)+(1,1,1) against z=10",
        Query::Intersect {
            entities: vec![
                plane_entity([0.0, 0.0, 1.0], -10.0).unwrap(),
                line_entity([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap(),
            ],
        },
        Expected::Point(point(10.0, 10.0, 10.0)),
    );
    run_scenario(&s).into_result().unwrap();
}

#[test]
fn point_to_point_and_point_to_plane() {
    let pp = Scenario::new(
        "A(0,0,0) to B(10,0,0)",
        Query::Distance {
            a: point_entity(0.0, 0.0, 0.0),
            b: point_entity(10.0, 0.0, 0.0),
        },
        Expected::Scalar(10.0),
    );
    let pl = Scenario::new(
        "(0,0,5) to z=0",
        Query::Distance {
            a: plane_entity([0.0, 0.0, 1.0], 0.0).unwrap(),
            b: point_entity(0.0, 0.0, 5.0),
        },
        Expected::Scalar(5.0),
    );
    for outcome in run_catalogue(&[pp, pl]) {
        assert!(outcome.passed, "{}: {}", outcome.name, outcome.detail);
    }
}

#[test]
fn quarter_turn_about_z() {
    let s = Scenario::new(
        "(1,0,0) by 90 deg about z",
        Query::Rotate {
            point: point(1.0, 0.0, 0.0),
            axis: line([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]).unwrap(),
            angle_deg: 90.0,
        },
        Expected::Point(point(0.0, 1.0, 0.0)),
    );
    run_scenario(&s).into_result().unwrap();
}

#[test]
fn queries_survive_json() {
    for s in catalogue().unwrap() {
        let json = serde_json::to_string(&s.query).unwrap();
        let query: Query = serde_json::from_str(&json).unwrap();
        let again = Scenario::new(&s.name, query, s.expected.clone());
        let outcome = run_scenario(&again);
        assert!(outcome.passed, "{} after JSON: {}", outcome.name, outcome.detail);
    }
}

#[test]
fn answers_survive_json() {
    for s in catalogue().unwrap() {
        let Ok(answer) = evaluate(&s.query) else {
            continue;
        };
        let json = serde_json::to_string(&answer).unwrap();
        let back: Answer = serde_json::from_str(&json)
            .unwrap_or_else(|e| panic!("{}: {} in {}", s.name, e, json));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(serde_json::to_value(&back).unwrap(), parsed, "{}", s.name);
    }
}
