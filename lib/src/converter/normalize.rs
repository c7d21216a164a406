//! Path data normalization.
//!
//! Output segments are absolute and limited to `M L H V C Q Z`: shorthand
//! curves get explicit control points, arcs become cubic curves, and the
//! accumulated transform is applied to every point.

use std::str::FromStr;

use lyon_geom::euclid::{default::Transform2D, Angle};
use lyon_geom::{point, vector, ArcFlags, SvgArc};
use svgtypes::{PathParser, PathSegment, Transform};

use crate::error::{Error, Warning};

/// Parse an SVG transform list, e.g. `translate(10 0) scale(2)`.
///
/// The empty string is the identity.
pub fn parse_transform(transform: &str) -> Result<Transform2D<f64>, Error> {
    let transform = transform.trim();
    if transform.is_empty() {
        return Ok(Transform2D::identity());
    }
    Transform::from_str(transform)
        .map(svg_transform_into_euclid_transform)
        .map_err(|err| Error::InvalidTransform {
            value: transform.to_string(),
            message: err.to_string(),
        })
}

pub fn svg_transform_into_euclid_transform(svg_transform: Transform) -> Transform2D<f64> {
    let Transform { a, b, c, d, e, f } = svg_transform;
    Transform2D::new(a, b, c, d, e, f)
}

/// Normalize path data and apply `transform` to it.
pub fn normalize(d: &str, transform: &str, warnings: &mut Vec<Warning>) -> Result<Vec<PathSegment>, Error> {
    normalize_segments(parse_path_data(d, warnings), transform)
}

/// Raw segments of `d`.
///
/// A syntax error ends the path: the segments before it are kept, as SVG
/// renderers do.
pub fn parse_path_data(d: &str, warnings: &mut Vec<Warning>) -> Vec<PathSegment> {
    let mut segments = vec![];
    for segment in PathParser::from(d) {
        match segment {
            Ok(segment) => segments.push(segment),
            Err(err) => {
                Warning::InvalidPathData {
                    message: err.to_string(),
                }
                .report(warnings);
                break;
            }
        }
    }
    segments
}

/// Same as [`normalize`] for already-parsed segments
pub fn normalize_segments(
    segments: impl IntoIterator<Item = PathSegment>,
    transform: &str,
) -> Result<Vec<PathSegment>, Error> {
    let transform = parse_transform(transform)?;
    let absolute = simplify(segments);
    if transform == Transform2D::identity() {
        Ok(absolute)
    } else {
        Ok(apply_transform(absolute, &transform))
    }
}

fn reflect(control: Option<(f64, f64)>, current: (f64, f64)) -> (f64, f64) {
    match control {
        Some((x, y)) => (2. * current.0 - x, 2. * current.1 - y),
        None => current,
    }
}

fn is_absolute(segment: &PathSegment) -> bool {
    use PathSegment::*;

    match *segment {
        MoveTo { abs, .. }
        | LineTo { abs, .. }
        | HorizontalLineTo { abs, .. }
        | VerticalLineTo { abs, .. }
        | CurveTo { abs, .. }
        | SmoothCurveTo { abs, .. }
        | Quadratic { abs, .. }
        | SmoothQuadratic { abs, .. }
        | EllipticalArc { abs, .. }
        | ClosePath { abs } => abs,
    }
}

/// Convert to absolute coordinates and expand shorthands and arcs
fn simplify(segments: impl IntoIterator<Item = PathSegment>) -> Vec<PathSegment> {
    use PathSegment::*;

    let mut out = vec![];
    let mut current = (0., 0.);
    let mut start = (0., 0.);
    let mut last_cubic_control: Option<(f64, f64)> = None;
    let mut last_quadratic_control: Option<(f64, f64)> = None;

    for segment in segments {
        let (ox, oy) = if is_absolute(&segment) { (0., 0.) } else { current };
        let mut cubic_control = None;
        let mut quadratic_control = None;

        match segment {
            MoveTo { x, y, .. } => {
                let (x, y) = (ox + x, oy + y);
                out.push(MoveTo { abs: true, x, y });
                current = (x, y);
                start = current;
            }
            LineTo { x, y, .. } => {
                let (x, y) = (ox + x, oy + y);
                out.push(LineTo { abs: true, x, y });
                current = (x, y);
            }
            HorizontalLineTo { x, .. } => {
                let x = ox + x;
                out.push(HorizontalLineTo { abs: true, x });
                current.0 = x;
            }
            VerticalLineTo { y, .. } => {
                let y = oy + y;
                out.push(VerticalLineTo { abs: true, y });
                current.1 = y;
            }
            CurveTo { x1, y1, x2, y2, x, y, .. } => {
                let (x1, y1, x2, y2, x, y) = (ox + x1, oy + y1, ox + x2, oy + y2, ox + x, oy + y);
                out.push(CurveTo { abs: true, x1, y1, x2, y2, x, y });
                cubic_control = Some((x2, y2));
                current = (x, y);
            }
            SmoothCurveTo { x2, y2, x, y, .. } => {
                let (x1, y1) = reflect(last_cubic_control, current);
                let (x2, y2, x, y) = (ox + x2, oy + y2, ox + x, oy + y);
                out.push(CurveTo { abs: true, x1, y1, x2, y2, x, y });
                cubic_control = Some((x2, y2));
                current = (x, y);
            }
            Quadratic { x1, y1, x, y, .. } => {
                let (x1, y1, x, y) = (ox + x1, oy + y1, ox + x, oy + y);
                out.push(Quadratic { abs: true, x1, y1, x, y });
                quadratic_control = Some((x1, y1));
                current = (x, y);
            }
            SmoothQuadratic { x, y, .. } => {
                let (x1, y1) = reflect(last_quadratic_control, current);
                let (x, y) = (ox + x, oy + y);
                out.push(Quadratic { abs: true, x1, y1, x, y });
                quadratic_control = Some((x1, y1));
                current = (x, y);
            }
            EllipticalArc {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
                ..
            } => {
                let (x, y) = (ox + x, oy + y);
                let svg_arc = SvgArc {
                    from: point(current.0, current.1),
                    to: point(x, y),
                    radii: vector(rx.abs(), ry.abs()),
                    x_rotation: Angle::degrees(x_axis_rotation),
                    flags: ArcFlags { large_arc, sweep },
                };
                if svg_arc.from == svg_arc.to {
                    // Zero-length arcs are omitted
                } else if svg_arc.is_straight_line() {
                    out.push(LineTo { abs: true, x, y });
                } else {
                    svg_arc.to_arc().for_each_cubic_bezier(&mut |cbs| {
                        out.push(CurveTo {
                            abs: true,
                            x1: cbs.ctrl1.x,
                            y1: cbs.ctrl1.y,
                            x2: cbs.ctrl2.x,
                            y2: cbs.ctrl2.y,
                            x: cbs.to.x,
                            y: cbs.to.y,
                        })
                    });
                }
                current = (x, y);
            }
            ClosePath { .. } => {
                out.push(ClosePath { abs: true });
                current = start;
            }
        }

        last_cubic_control = cubic_control;
        last_quadratic_control = quadratic_control;
    }

    out
}

/// Apply `transform` to simplified segments.
///
/// Horizontal and vertical lines stop being axis-aligned under a general
/// transform, so they become plain lines.
fn apply_transform(segments: Vec<PathSegment>, transform: &Transform2D<f64>) -> Vec<PathSegment> {
    use PathSegment::*;

    let tp = |x: f64, y: f64| transform.transform_point(point(x, y));
    let mut current = (0., 0.);
    let mut start = (0., 0.);

    segments
        .into_iter()
        .map(|segment| {
            let (x, y) = match segment {
                MoveTo { x, y, .. } => {
                    start = (x, y);
                    (x, y)
                }
                LineTo { x, y, .. } | CurveTo { x, y, .. } | Quadratic { x, y, .. } => (x, y),
                HorizontalLineTo { x, .. } => (x, current.1),
                VerticalLineTo { y, .. } => (current.0, y),
                ClosePath { .. } => start,
                other => {
                    // simplify() never produces these
                    return other;
                }
            };
            current = (x, y);
            let to = tp(x, y);

            match segment {
                MoveTo { .. } => MoveTo { abs: true, x: to.x, y: to.y },
                LineTo { .. } | HorizontalLineTo { .. } | VerticalLineTo { .. } => {
                    LineTo { abs: true, x: to.x, y: to.y }
                }
                CurveTo { x1, y1, x2, y2, .. } => {
                    let (c1, c2) = (tp(x1, y1), tp(x2, y2));
                    CurveTo {
                        abs: true,
                        x1: c1.x,
                        y1: c1.y,
                        x2: c2.x,
                        y2: c2.y,
                        x: to.x,
                        y: to.y,
                    }
                }
                Quadratic { x1, y1, .. } => {
                    let c = tp(x1, y1);
                    Quadratic {
                        abs: true,
                        x1: c.x,
                        y1: c.y,
                        x: to.x,
                        y: to.y,
                    }
                }
                other => other,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use PathSegment::*;

    fn norm(d: &str, transform: &str) -> Vec<PathSegment> {
        normalize(d, transform, &mut vec![]).unwrap()
    }

    #[test]
    fn converts_relative_to_absolute() {
        assert_eq!(
            norm("m10 10 l5 0 h5 v5 z", ""),
            vec![
                MoveTo { abs: true, x: 10., y: 10. },
                LineTo { abs: true, x: 15., y: 10. },
                HorizontalLineTo { abs: true, x: 20. },
                VerticalLineTo { abs: true, y: 15. },
                ClosePath { abs: true },
            ]
        );
    }

    #[test]
    fn expands_shorthand_curves() {
        let segments = norm("M0 0 C0 10 10 10 10 0 S20 -10 20 0", "");
        assert_eq!(
            segments[2],
            CurveTo { abs: true, x1: 10., y1: -10., x2: 20., y2: -10., x: 20., y: 0. }
        );

        let segments = norm("M0 0 Q5 5 10 0 T20 0", "");
        assert_eq!(segments[2], Quadratic { abs: true, x1: 15., y1: -5., x: 20., y: 0. });
    }

    #[test]
    fn smooth_curve_without_previous_curve_uses_current_point() {
        let segments = norm("M0 0 L5 5 S10 10 15 5", "");
        assert_eq!(
            segments[2],
            CurveTo { abs: true, x1: 5., y1: 5., x2: 10., y2: 10., x: 15., y: 5. }
        );
    }

    #[test]
    fn expands_arcs_to_cubics() {
        let segments = norm("M0 0 A10 10 0 0 1 20 0", "");
        assert!(segments.len() >= 2);
        assert!(segments[1..].iter().all(|s| matches!(s, CurveTo { .. })));
        let CurveTo { x, y, .. } = segments[segments.len() - 1] else {
            panic!("expected a curve");
        };
        assert!((x - 20.).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn zero_radius_arc_is_a_line() {
        assert_eq!(norm("M0 0 A0 0 0 0 1 20 0", "")[1], LineTo { abs: true, x: 20., y: 0. });
    }

    #[test]
    fn applies_transform_and_drops_axis_lines() {
        assert_eq!(
            norm("M0 0 H10 V10", "translate(5 5) scale(2)"),
            vec![
                MoveTo { abs: true, x: 5., y: 5. },
                LineTo { abs: true, x: 25., y: 5. },
                LineTo { abs: true, x: 25., y: 25. },
            ]
        );
    }

    #[test]
    fn invalid_path_data_keeps_prefix() {
        let mut warnings = vec![];
        let segments = normalize("M0 0 L10 10 L oops", "", &mut warnings).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn invalid_transform_is_an_error() {
        assert!(matches!(
            normalize("M0 0", "rotate(", &mut vec![]),
            Err(Error::InvalidTransform { .. })
        ));
    }
}
