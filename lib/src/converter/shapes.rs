//! Path synthesis for the basic shapes.
//!
//! Every shape is expressed as absolute [`PathSegment`]s so it can go through
//! the same transform and canonicalization steps as `<path>` data.

use svgtypes::PathSegment;

use crate::model::Point;

/// Control point factor for approximating a quarter ellipse with one cubic Bézier
pub const KAPPA: f64 = 0.552284749831;

pub fn lerp(v0: f64, v1: f64, t: f64) -> f64 {
    v0 + t * (v1 - v0)
}

/// Axis along which a rounded corner is entered
#[derive(Clone, Copy)]
enum Entry {
    XFirst,
    YFirst,
}

fn move_to(p: Point) -> PathSegment {
    PathSegment::MoveTo {
        abs: true,
        x: p.x,
        y: p.y,
    }
}

fn line_to(p: Point) -> PathSegment {
    PathSegment::LineTo {
        abs: true,
        x: p.x,
        y: p.y,
    }
}

fn close() -> PathSegment {
    PathSegment::ClosePath { abs: true }
}

/// Quarter-ellipse corner from `from` to `to`.
///
/// The first control point stays on the entry axis and the second on the exit
/// axis, keeping the tangents continuous with the adjacent straight edges.
fn corner(from: Point, to: Point, entry: Entry) -> PathSegment {
    let (c1, c2) = match entry {
        Entry::XFirst => (
            Point::new(lerp(from.x, to.x, KAPPA), from.y),
            Point::new(to.x, lerp(to.y, from.y, KAPPA)),
        ),
        Entry::YFirst => (
            Point::new(from.x, lerp(from.y, to.y, KAPPA)),
            Point::new(lerp(to.x, from.x, KAPPA), to.y),
        ),
    };
    PathSegment::CurveTo {
        abs: true,
        x1: c1.x,
        y1: c1.y,
        x2: c2.x,
        y2: c2.y,
        x: to.x,
        y: to.y,
    }
}

/// Rectangle with optional corner radii.
///
/// If only one of `rx`/`ry` is given the other takes its value. Radii are
/// clamped to half the width and height.
pub fn rect(x: f64, y: f64, width: f64, height: f64, rx: Option<f64>, ry: Option<f64>) -> Vec<PathSegment> {
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0., 0.),
    };
    let rx = rx.max(0.).min(width.abs() / 2.);
    let ry = ry.max(0.).min(height.abs() / 2.);

    if rx == 0. || ry == 0. {
        return vec![
            move_to(Point::new(x, y)),
            line_to(Point::new(x + width, y)),
            line_to(Point::new(x + width, y + height)),
            line_to(Point::new(x, y + height)),
            line_to(Point::new(x, y)),
            close(),
        ];
    }

    let (left, top, right, bottom) = (x, y, x + width, y + height);

    // Clockwise from the end of the top-left corner
    let top_start = Point::new(left + rx, top);
    let top_end = Point::new(right - rx, top);
    let right_start = Point::new(right, top + ry);
    let right_end = Point::new(right, bottom - ry);
    let bottom_start = Point::new(right - rx, bottom);
    let bottom_end = Point::new(left + rx, bottom);
    let left_start = Point::new(left, bottom - ry);
    let left_end = Point::new(left, top + ry);

    let mut segments = vec![move_to(top_start)];
    edge(&mut segments, top_start, top_end);
    segments.push(corner(top_end, right_start, Entry::XFirst));
    edge(&mut segments, right_start, right_end);
    segments.push(corner(right_end, bottom_start, Entry::YFirst));
    edge(&mut segments, bottom_start, bottom_end);
    segments.push(corner(bottom_end, left_start, Entry::XFirst));
    edge(&mut segments, left_start, left_end);
    segments.push(corner(left_end, top_start, Entry::YFirst));
    segments.push(close());
    segments
}

/// Straight edge between two corners, skipped when the corners meet
fn edge(segments: &mut Vec<PathSegment>, from: Point, to: Point) {
    if from != to {
        segments.push(line_to(to));
    }
}

/// A circle is a square with fully rounded corners
pub fn circle(cx: f64, cy: f64, r: f64) -> Vec<PathSegment> {
    rect(cx - r, cy - r, 2. * r, 2. * r, Some(r), Some(r))
}

/// Open polyline through `points`, closed when `closed` is set (polygon)
pub fn poly(points: &[Point], closed: bool) -> Vec<PathSegment> {
    let mut segments = Vec::with_capacity(points.len() + 1);
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        segments.push(move_to(*first));
        segments.extend(iter.map(|p| line_to(*p)));
        if closed {
            segments.push(close());
        }
    }
    segments
}
