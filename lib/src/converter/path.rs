use lyon_geom::{point, QuadraticBezierSegment};
use svgtypes::PathSegment;

use crate::error::Warning;
use crate::model::{Command, Point};

/// Map normalized segments onto [`Command`]s.
///
/// Expects the output of [`super::normalize`]: absolute `M L H V Q C Z`.
/// Anything else is dropped with a warning.
pub fn canonicalize(segments: &[PathSegment], warnings: &mut Vec<Warning>) -> Vec<Command> {
    use PathSegment::*;

    let mut commands = Vec::with_capacity(segments.len());
    let mut current = Point::default();
    let mut start = Point::default();

    for segment in segments {
        let command = match *segment {
            MoveTo { abs: true, x, y } => {
                start = Point::new(x, y);
                Command::Move { to: start }
            }
            LineTo { abs: true, x, y } => Command::Line { to: Point::new(x, y) },
            HorizontalLineTo { abs: true, x } => Command::Line {
                to: Point::new(x, current.y),
            },
            VerticalLineTo { abs: true, y } => Command::Line {
                to: Point::new(current.x, y),
            },
            Quadratic { abs: true, x1, y1, x, y } => Command::QuadCurve {
                to: Point::new(x, y),
                control_point: Point::new(x1, y1),
            },
            CurveTo {
                abs: true,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => Command::CubicCurve {
                to: Point::new(x, y),
                control_point1: Point::new(x1, y1),
                control_point2: Point::new(x2, y2),
            },
            ClosePath { .. } => Command::Close,
            other => {
                Warning::UnsupportedSegment {
                    segment: format!("{other:?}"),
                }
                .report(warnings);
                continue;
            }
        };

        current = command.to().unwrap_or(start);
        commands.push(command);
    }

    commands
}

/// Replace every quadratic curve with the equivalent cubic curve
pub fn elevate_quadratics(commands: Vec<Command>) -> Vec<Command> {
    let mut current = Point::default();
    let mut start = Point::default();

    commands
        .into_iter()
        .map(|command| {
            let command = match command {
                Command::QuadCurve { to, control_point } => {
                    let cubic = QuadraticBezierSegment {
                        from: point(current.x, current.y),
                        ctrl: point(control_point.x, control_point.y),
                        to: point(to.x, to.y),
                    }
                    .to_cubic();
                    Command::CubicCurve {
                        to,
                        control_point1: cubic.ctrl1.into(),
                        control_point2: cubic.ctrl2.into(),
                    }
                }
                other => other,
            };
            if let Command::Move { to } = command {
                start = to;
            }
            current = command.to().unwrap_or(start);
            command
        })
        .collect()
}
