use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::converter::Presentation;
use crate::error::Warning;

/// Color used when neither the element nor its ancestors set a fill
pub const DEFAULT_FILL: &str = "black";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

impl FromStr for LineCap {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            "square" => Ok(LineCap::Square),
            _ => Err(()),
        }
    }
}

/// Fully resolved paint and line style of a path.
///
/// `fill` and `stroke` are `None` when that part of the shape is not painted.
/// When present they are final color strings with any opacity already folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    pub fill_rule: FillRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub stroke_line_cap: LineCap,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(DEFAULT_FILL.to_string()),
            fill_rule: FillRule::NonZero,
            stroke: None,
            stroke_width: 1.,
            stroke_line_cap: LineCap::Butt,
        }
    }
}

/// A parsed CSS color with an unpremultiplied alpha in `0..=1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

/// Alpha as the shortest decimal that maps back onto the 8-bit value, so
/// `rgba(0,0,0,0.5)` gives `0.5` rather than `128 / 255`
fn alpha_fraction(alpha: u8) -> f64 {
    let alpha = f64::from(alpha);
    let exact = alpha / 255.;
    (0..=3)
        .map(|decimals| {
            let scale = 10f64.powi(decimals);
            (exact * scale).round() / scale
        })
        .find(|candidate| (candidate * 255. - alpha).abs() < 1.)
        .unwrap_or(exact)
}

/// Parse a CSS color.
///
/// Returns `None` for `none` and for anything that isn't a plain color, such as
/// a `url(#gradient)` paint server reference.
pub fn parse_css_color(color: &str) -> Option<Rgba> {
    let color = color.trim();
    if color == "none" {
        return None;
    }
    svgtypes::Color::from_str(color).ok().map(|c| Rgba {
        red: c.red,
        green: c.green,
        blue: c.blue,
        alpha: alpha_fraction(c.alpha),
    })
}

/// Resolve the style of an element from its own presentation attributes and the
/// context inherited from its ancestors.
///
/// Each property comes from the element if set, else from the context, else the default.
pub fn resolve_style(own: &Presentation, context: &Presentation, warnings: &mut Vec<Warning>) -> Style {
    let fill_opacity = own.fill_opacity.or(context.fill_opacity).unwrap_or(1.);
    let fill = match own.fill.as_deref().or(context.fill.as_deref()) {
        Some("none") => None,
        Some(color) => Some(apply_opacity(color, fill_opacity, warnings)),
        None => Some(apply_opacity(DEFAULT_FILL, fill_opacity, warnings)),
    };

    let stroke_opacity = own.stroke_opacity.or(context.stroke_opacity).unwrap_or(1.);
    let stroke = match own.stroke.as_deref().or(context.stroke.as_deref()) {
        None | Some("none") => None,
        Some(color) => Some(apply_opacity(color, stroke_opacity, warnings)),
    };

    let fill_rule = match own.fill_rule.as_deref().or(context.fill_rule.as_deref()) {
        Some("evenodd") => FillRule::EvenOdd,
        _ => FillRule::NonZero,
    };

    let stroke_line_cap = match own
        .stroke_line_cap
        .as_deref()
        .or(context.stroke_line_cap.as_deref())
    {
        None => LineCap::Butt,
        Some(value) => value.parse().unwrap_or_else(|()| {
            Warning::UnsupportedLineCap {
                value: value.to_string(),
            }
            .report(warnings);
            LineCap::Butt
        }),
    };

    Style {
        fill,
        fill_rule,
        stroke,
        stroke_width: own.stroke_width.or(context.stroke_width).unwrap_or(1.),
        stroke_line_cap,
    }
}

/// Fold an opacity into a color.
///
/// Opaque colors are returned untouched so output stays stable.
fn apply_opacity(color: &str, opacity: f64, warnings: &mut Vec<Warning>) -> String {
    if opacity >= 1. {
        return color.to_string();
    }

    match parse_css_color(color) {
        Some(Rgba {
            red,
            green,
            blue,
            alpha,
        }) => {
            let alpha = alpha * opacity.max(0.);
            format!("rgba({red},{green},{blue},{alpha})")
        }
        None => {
            Warning::UnparseableColor {
                value: color.to_string(),
            }
            .report(warnings);
            color.to_string()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn resolve(own: Presentation) -> (Style, Vec<Warning>) {
        let mut warnings = vec![];
        let style = resolve_style(&own, &Presentation::default(), &mut warnings);
        (style, warnings)
    }

    #[test]
    fn applies_svg_default_values() {
        let (style, warnings) = resolve(Presentation::default());
        assert_eq!(style, Style::default());
        assert_eq!(style.fill.as_deref(), Some("black"));
        assert_eq!(style.stroke, None);
        assert_eq!(style.stroke_width, 1.);
        assert_eq!(style.stroke_line_cap, LineCap::Butt);
        assert_eq!(style.fill_rule, FillRule::NonZero);
        assert!(warnings.is_empty());
    }

    #[test]
    fn erases_none_color_values() {
        let (style, _) = resolve(Presentation {
            fill: Some("none".into()),
            fill_opacity: Some(0.5),
            stroke: Some("none".into()),
            stroke_opacity: Some(0.5),
            ..Default::default()
        });
        assert_eq!(style.fill, None);
        assert_eq!(style.stroke, None);
    }

    #[test]
    fn applies_fill_and_stroke_opacity() {
        let (style, _) = resolve(Presentation {
            fill: Some("red".into()),
            fill_opacity: Some(0.5),
            stroke: Some("red".into()),
            stroke_opacity: Some(0.5),
            ..Default::default()
        });
        assert_eq!(style.fill.as_deref(), Some("rgba(255,0,0,0.5)"));
        assert_eq!(style.stroke.as_deref(), Some("rgba(255,0,0,0.5)"));
    }

    #[test]
    fn ignores_opacity_of_one() {
        let (style, _) = resolve(Presentation {
            fill: Some("red".into()),
            fill_opacity: Some(1.),
            stroke: Some("red".into()),
            stroke_opacity: Some(1.),
            ..Default::default()
        });
        assert_eq!(style.fill.as_deref(), Some("red"));
        assert_eq!(style.stroke.as_deref(), Some("red"));
    }

    #[test]
    fn opacity_multiplies_existing_alpha() {
        let (style, _) = resolve(Presentation {
            fill: Some("rgba(255,0,0,0.5)".into()),
            fill_opacity: Some(0.5),
            stroke: Some("rgba(0,0,0,0.8)".into()),
            stroke_opacity: Some(0.5),
            ..Default::default()
        });
        assert_eq!(style.fill.as_deref(), Some("rgba(255,0,0,0.25)"));
        assert_eq!(style.stroke.as_deref(), Some("rgba(0,0,0,0.4)"));
    }

    #[test]
    fn own_attributes_win_over_context() {
        let context = Presentation {
            fill: Some("blue".into()),
            stroke: Some("green".into()),
            stroke_width: Some(3.),
            fill_rule: Some("evenodd".into()),
            ..Default::default()
        };
        let own = Presentation {
            fill: Some("red".into()),
            ..Default::default()
        };
        let style = resolve_style(&own, &context, &mut vec![]);
        assert_eq!(style.fill.as_deref(), Some("red"));
        assert_eq!(style.stroke.as_deref(), Some("green"));
        assert_eq!(style.stroke_width, 3.);
        assert_eq!(style.fill_rule, FillRule::EvenOdd);
    }

    #[test]
    fn inherited_none_suppresses_paint() {
        let context = Presentation {
            fill: Some("none".into()),
            ..Default::default()
        };
        let style = resolve_style(&Presentation::default(), &context, &mut vec![]);
        assert_eq!(style.fill, None);
    }

    #[test]
    fn unsupported_line_cap_falls_back_to_butt() {
        let (style, warnings) = resolve(Presentation {
            stroke_line_cap: Some("pointy".into()),
            ..Default::default()
        });
        assert_eq!(style.stroke_line_cap, LineCap::Butt);
        assert_eq!(
            warnings,
            vec![Warning::UnsupportedLineCap {
                value: "pointy".into()
            }]
        );
    }

    #[test]
    fn unparseable_color_keeps_original_string() {
        let (style, warnings) = resolve(Presentation {
            fill: Some("url(#gradient)".into()),
            fill_opacity: Some(0.5),
            ..Default::default()
        });
        assert_eq!(style.fill.as_deref(), Some("url(#gradient)"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn parses_standard_colors() {
        let rgba = |red, green, blue, alpha| Some(Rgba { red, green, blue, alpha });
        assert_eq!(parse_css_color("red"), rgba(255, 0, 0, 1.));
        assert_eq!(parse_css_color("#00ff00"), rgba(0, 255, 0, 1.));
        assert_eq!(parse_css_color("rgba(0, 0, 255, 0.25)"), rgba(0, 0, 255, 0.25));
    }

    #[test]
    fn ignores_none_and_invalid_colors() {
        assert_eq!(parse_css_color("none"), None);
        assert_eq!(parse_css_color("url(#gradient)"), None);
    }
}
