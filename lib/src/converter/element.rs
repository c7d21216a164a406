//! Typed attribute records, one per supported element kind.
//!
//! Raw [`Node`] attributes are validated and converted here so the rest of the
//! converter never looks at attribute strings.

use std::str::FromStr;

use log::warn;
use roxmltree::Node;
use svgtypes::{NumberListParser, PathSegment, ViewBox};

use super::context::Presentation;
use super::normalize::parse_path_data;
use super::shapes;
use super::units::UnitResolver;
use crate::error::{Error, Warning};
use crate::model::{Point, Rect};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Path {
        d: String,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: Option<f64>,
        ry: Option<f64>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Polyline {
        points: Vec<Point>,
    },
    Polygon {
        points: Vec<Point>,
    },
}

impl Shape {
    /// Untransformed path segments, parsed from `d` or synthesized from the
    /// shape's geometry
    pub fn segments(&self, warnings: &mut Vec<Warning>) -> Vec<PathSegment> {
        match self {
            Shape::Path { d } => parse_path_data(d, warnings),
            Shape::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => shapes::rect(*x, *y, *width, *height, *rx, *ry),
            Shape::Circle { cx, cy, r } => shapes::circle(*cx, *cy, *r),
            Shape::Polyline { points } => shapes::poly(points, false),
            Shape::Polygon { points } => shapes::poly(points, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub shape: Shape,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Use {
    /// Fragment identifier without the leading `#`
    pub href: Option<String>,
    pub x: f64,
    pub y: f64,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Root {
        view_box: Option<Rect>,
        presentation: Presentation,
    },
    Group {
        presentation: Presentation,
    },
    Drawable(Drawable),
    Use(Use),
    /// Never drawn directly: `defs`, `mask`, `title`, `desc`
    Hidden,
    Unknown,
}

impl Element {
    pub fn from_node(node: &Node, units: &UnitResolver) -> Result<Self, Error> {
        let length = |attr: &str| units.length_attr(node, attr);
        let presentation = || Presentation::from_node(node, units);
        let drawable = |shape| -> Result<Self, Error> {
            Ok(Self::Drawable(Drawable {
                shape,
                presentation: presentation()?,
            }))
        };

        match node.tag_name().name() {
            "svg" => Ok(Self::Root {
                view_box: node.attribute("viewBox").and_then(parse_view_box),
                presentation: presentation()?,
            }),
            "g" => Ok(Self::Group {
                presentation: presentation()?,
            }),
            "path" => drawable(Shape::Path {
                d: node.attribute("d").unwrap_or_default().to_string(),
            }),
            "rect" => drawable(Shape::Rect {
                x: length("x")?.unwrap_or_default(),
                y: length("y")?.unwrap_or_default(),
                width: length("width")?.unwrap_or_default(),
                height: length("height")?.unwrap_or_default(),
                rx: length("rx")?,
                ry: length("ry")?,
            }),
            "circle" => drawable(Shape::Circle {
                cx: length("cx")?.unwrap_or_default(),
                cy: length("cy")?.unwrap_or_default(),
                r: length("r")?.unwrap_or_default(),
            }),
            "polyline" => drawable(Shape::Polyline {
                points: parse_points(node)?,
            }),
            "polygon" => drawable(Shape::Polygon {
                points: parse_points(node)?,
            }),
            "use" => Ok(Self::Use(Use {
                href: node
                    .attribute("href")
                    .or_else(|| node.attribute((XLINK_NS, "href")))
                    .map(|href| href.strip_prefix('#').unwrap_or(href).to_string()),
                x: length("x")?.unwrap_or_default(),
                y: length("y")?.unwrap_or_default(),
                presentation: presentation()?,
            })),
            "defs" | "mask" | "title" | "desc" => Ok(Self::Hidden),
            _ => Ok(Self::Unknown),
        }
    }
}

/// `viewBox="x y width height"`
pub fn parse_view_box(view_box: &str) -> Option<Rect> {
    match ViewBox::from_str(view_box) {
        Ok(ViewBox { x, y, w, h }) => Some(Rect::new(x, y, w, h)),
        Err(err) => {
            warn!("Ignoring invalid viewBox {view_box:?}: {err}");
            None
        }
    }
}

/// Coordinate pairs of a `points` attribute
fn parse_points(node: &Node) -> Result<Vec<Point>, Error> {
    let value = node.attribute("points").unwrap_or_default();
    let numbers = NumberListParser::from(value)
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| Error::InvalidNumber {
            element: node.tag_name().name().to_string(),
            attribute: "points".to_string(),
            value: value.to_string(),
        })?;

    if numbers.len() % 2 != 0 {
        return Err(Error::OddPointCount {
            element: node.tag_name().name().to_string(),
            count: numbers.len(),
        });
    }

    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use roxmltree::Document;

    fn element(svg: &str) -> Result<Element, Error> {
        let doc = Document::parse(svg).unwrap();
        Element::from_node(&doc.root_element(), &UnitResolver::default())
    }

    #[test]
    fn reads_root_view_box() {
        let Element::Root { view_box, .. } = element(r#"<svg viewBox="0 0 24 12"/>"#).unwrap() else {
            panic!("expected root");
        };
        assert_eq!(view_box, Some(Rect::new(0., 0., 24., 12.)));

        let Element::Root { view_box, .. } = element(r#"<svg/>"#).unwrap() else {
            panic!("expected root");
        };
        assert_eq!(view_box, None);
    }

    #[test]
    fn missing_geometry_defaults_to_zero() {
        let Element::Drawable(Drawable { shape, .. }) = element(r#"<circle r="4"/>"#).unwrap() else {
            panic!("expected drawable");
        };
        assert_eq!(
            shape,
            Shape::Circle {
                cx: 0.,
                cy: 0.,
                r: 4.
            }
        );
    }

    #[test]
    fn reads_points() {
        let Element::Drawable(Drawable { shape, .. }) =
            element(r#"<polygon points="0,0 10,0 10 10"/>"#).unwrap()
        else {
            panic!("expected drawable");
        };
        assert_eq!(
            shape,
            Shape::Polygon {
                points: vec![Point::new(0., 0.), Point::new(10., 0.), Point::new(10., 10.)]
            }
        );
    }

    #[test]
    fn odd_point_count_is_an_error() {
        assert!(matches!(
            element(r#"<polyline points="0,0 10"/>"#),
            Err(Error::OddPointCount { count: 3, .. })
        ));
    }

    #[test]
    fn reads_either_href() {
        let xlink = element(
            r##"<use xmlns:xlink="http://www.w3.org/1999/xlink" xlink:href="#dot" x="2"/>"##,
        )
        .unwrap();
        let plain = element(r##"<use href="#dot" y="3"/>"##).unwrap();
        assert!(matches!(xlink, Element::Use(Use { ref href, x, .. }) if href.as_deref() == Some("dot") && x == 2.));
        assert!(matches!(plain, Element::Use(Use { ref href, y, .. }) if href.as_deref() == Some("dot") && y == 3.));
    }

    #[test]
    fn classifies_hidden_and_unknown() {
        assert_eq!(element("<defs/>").unwrap(), Element::Hidden);
        assert_eq!(element("<animate/>").unwrap(), Element::Unknown);
    }

    #[test]
    fn every_shape_yields_segments() {
        let mut warnings = vec![];
        let Element::Drawable(path) = element(r#"<path d="M0 0 L1 1 L oops"/>"#).unwrap() else {
            panic!("expected drawable");
        };
        assert_eq!(path.shape.segments(&mut warnings).len(), 2);
        assert_eq!(warnings.len(), 1);

        let Element::Drawable(circle) = element(r#"<circle r="1"/>"#).unwrap() else {
            panic!("expected drawable");
        };
        assert_eq!(circle.shape.segments(&mut warnings).len(), 6);
        assert_eq!(warnings.len(), 1);
    }
}
