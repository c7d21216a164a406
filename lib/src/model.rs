use serde::{Deserialize, Serialize};

use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<lyon_geom::Point<f64>> for Point {
    fn from(p: lyon_geom::Point<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Axis-aligned rectangle, used for the document viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A single drawing command with absolute coordinates.
///
/// Serialized with a `type` tag, e.g. `{"type":"line","to":{"x":1.0,"y":2.0}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    Move {
        to: Point,
    },
    Line {
        to: Point,
    },
    QuadCurve {
        to: Point,
        #[serde(rename = "controlPoint")]
        control_point: Point,
    },
    CubicCurve {
        to: Point,
        #[serde(rename = "controlPoint1")]
        control_point1: Point,
        #[serde(rename = "controlPoint2")]
        control_point2: Point,
    },
    Close,
}

impl Command {
    /// End point of the command, if it moves the pen
    pub fn to(&self) -> Option<Point> {
        match self {
            Command::Move { to }
            | Command::Line { to }
            | Command::QuadCurve { to, .. }
            | Command::CubicCurve { to, .. } => Some(*to),
            Command::Close => None,
        }
    }
}

/// One drawable shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub id: String,
    pub commands: Vec<Command>,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Elements, attributes, and attribute values present in the input that
    /// the model cannot represent
    pub unsupported_features: Vec<String>,
}

/// Result of a conversion: a flat list of paths and the document viewport
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    pub children: Vec<PathNode>,
    #[serde(rename = "viewBox", default, skip_serializing_if = "Option::is_none")]
    pub view_box: Option<Rect>,
    pub metadata: Metadata,
}
