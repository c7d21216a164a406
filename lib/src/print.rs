use std::io;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::Error;
use crate::model::{Command, Model, PathNode, Point, Rect};
use crate::style::FillRule;

/// Round to 3 decimals, dropping trailing zeros and negative zero
fn num(value: f64) -> String {
    let rounded = (value * 1000.).round() / 1000.;
    if rounded == 0. {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn point(p: &Point) -> String {
    format!("{},{}", num(p.x), num(p.y))
}

fn command(command: &Command) -> String {
    match command {
        Command::Move { to } => format!("M {}", point(to)),
        Command::Line { to } => format!("L {}", point(to)),
        Command::QuadCurve { to, control_point } => {
            format!("Q {} {}", point(control_point), point(to))
        }
        Command::CubicCurve {
            to,
            control_point1,
            control_point2,
        } => format!(
            "C {} {} {}",
            point(control_point1),
            point(control_point2),
            point(to)
        ),
        Command::Close => "Z".to_string(),
    }
}

fn path_element(node: &PathNode) -> BytesStart<'static> {
    let style = &node.style;
    let mut element = BytesStart::new("path");
    element.push_attribute(("fill", style.fill.as_deref().unwrap_or("none")));
    if let Some(stroke) = &style.stroke {
        element.push_attribute(("stroke", stroke.as_str()));
    }
    if style.stroke_width != 1. {
        element.push_attribute(("stroke-width", num(style.stroke_width).as_str()));
    }
    element.push_attribute(("stroke-linecap", style.stroke_line_cap.as_str()));
    if style.fill_rule == FillRule::EvenOdd {
        element.push_attribute(("fill-rule", style.fill_rule.as_str()));
    }
    let d = node.commands.iter().map(command).collect::<Vec<_>>().join(" ");
    element.push_attribute(("d", d.as_str()));
    element
}

fn root_element(view_box: Option<&Rect>) -> BytesStart<'static> {
    let mut svg = BytesStart::new("svg");
    if let Some(view_box) = view_box {
        svg.push_attribute(("width", format!("{}px", view_box.width).as_str()));
        svg.push_attribute(("height", format!("{}px", view_box.height).as_str()));
        let view_box_attr = format!(
            "{} {} {} {}",
            view_box.x, view_box.y, view_box.width, view_box.height
        );
        svg.push_attribute(("viewBox", view_box_attr.as_str()));
    }
    svg.push_attribute(("version", "1.1"));
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("xmlns:xlink", "http://www.w3.org/1999/xlink"));
    svg
}

/// Write a [`Model`] as a standalone SVG document into `inner`, one path per line.
///
/// The viewBox is written exactly, path coordinates with at most 3 decimals.
pub fn write_svg<W: io::Write>(model: &Model, inner: W) -> Result<W, Error> {
    let mut writer = Writer::new_with_indent(inner, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(root_element(model.view_box.as_ref())))?;
    for node in &model.children {
        writer.write_event(Event::Empty(path_element(node)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(writer.into_inner())
}

/// Render a [`Model`] back into a standalone SVG document.
///
/// Converting the output again gives back the same paths and styles.
pub fn print_svg(model: &Model) -> Result<String, Error> {
    let mut svg = String::from_utf8(write_svg(model, Vec::new())?)?;
    svg.push('\n');
    Ok(svg)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::style::Style;

    #[test]
    fn numbers_are_rounded_to_three_decimals() {
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(2.), "2");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-1.5), "-1.5");
    }

    #[test]
    fn prints_commands() {
        let commands = [
            Command::Move {
                to: Point::new(0., 0.),
            },
            Command::QuadCurve {
                to: Point::new(4., 0.),
                control_point: Point::new(2., 2.),
            },
            Command::CubicCurve {
                to: Point::new(9., 9.),
                control_point1: Point::new(5., 6.),
                control_point2: Point::new(7., 8.),
            },
            Command::Close,
        ];
        assert_eq!(
            commands.iter().map(command).collect::<Vec<_>>().join(" "),
            "M 0,0 Q 2,2 4,0 C 5,6 7,8 9,9 Z"
        );
    }

    #[test]
    fn prints_document() {
        let model = Model {
            children: vec![PathNode {
                id: "dot".to_string(),
                commands: vec![
                    Command::Move {
                        to: Point::new(1., 1.),
                    },
                    Command::Line {
                        to: Point::new(2., 1.),
                    },
                ],
                style: Style {
                    fill: None,
                    stroke: Some("red".to_string()),
                    stroke_width: 2.,
                    fill_rule: FillRule::EvenOdd,
                    ..Style::default()
                },
            }],
            view_box: Some(Rect::new(0., 0., 24., 24.)),
            ..Model::default()
        };

        assert_eq!(
            print_svg(&model).unwrap(),
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<svg width=\"24px\" height=\"24px\" viewBox=\"0 0 24 24\" version=\"1.1\" ",
                "xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n",
                "  <path fill=\"none\" stroke=\"red\" stroke-width=\"2\" stroke-linecap=\"butt\" ",
                "fill-rule=\"evenodd\" d=\"M 1,1 L 2,1\"/>\n",
                "</svg>\n"
            )
        );
    }

    #[test]
    fn omits_view_box_when_unknown() {
        let svg = print_svg(&Model::default()).unwrap();
        assert!(svg.contains("<svg version=\"1.1\""));
        assert!(!svg.contains("viewBox"));
    }

    #[test]
    fn view_box_is_written_exactly() {
        let model = Model {
            view_box: Some(Rect::new(-0.5, 0., 10.12345, 5.5)),
            ..Model::default()
        };
        let svg = print_svg(&model).unwrap();
        assert!(svg.contains(r#"<svg width="10.12345px" height="5.5px" viewBox="-0.5 0 10.12345 5.5""#));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let model = Model {
            children: vec![PathNode {
                id: "odd".to_string(),
                commands: vec![],
                style: Style {
                    fill: Some(r##"url("#a")&b"##.to_string()),
                    ..Style::default()
                },
            }],
            ..Model::default()
        };
        let svg = print_svg(&model).unwrap();
        assert!(svg.contains(r#"<path fill="url(&quot;#a&quot;)&amp;b""#));
    }
}
