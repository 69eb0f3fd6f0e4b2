use std::fmt;

use serde::{Deserialize, Serialize};

use super::line::Line;
use super::plane::Plane;
use super::point::Point3d;

/// Any geometric entity the kernel accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Point(Point3d),
    Line(Line),
    Plane(Plane),
}

/// Discriminant of [`Entity`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Point,
    Line,
    Plane,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Point(_) => EntityKind::Point,
            Entity::Line(_) => EntityKind::Line,
            Entity::Plane(_) => EntityKind::Plane,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Point => "point",
            EntityKind::Line => "line",
            EntityKind::Plane => "plane",
        };
        f.write_str(name)
    }
}

/// Comma-separated kind list, e.g. `"point, plane"`.
pub fn describe_kinds(entities: &[Entity]) -> String {
    entities
        .iter()
        .map(|e| e.kind().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Point3d> for Entity {
    fn from(p: Point3d) -> Self {
        Entity::Point(p)
    }
}

impl From<Line> for Entity {
    fn from(l: Line) -> Self {
        Entity::Line(l)
    }
}

impl From<Plane> for Entity {
    fn from(p: Plane) -> Self {
        Entity::Plane(p)
    }
}
