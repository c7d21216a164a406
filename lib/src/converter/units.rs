use std::str::FromStr;

use log::warn;
use roxmltree::Node;
use svgtypes::{Length, LengthUnit};

use crate::error::Error;

/// CSS pixels per inch, used to turn absolute units into user units
pub const CSS_DEFAULT_DPI: f64 = 96.;

/// Font size assumed for `em` and `ex`, in user units
const ASSUMED_FONT_SIZE: f64 = 16.;

/// Viewport dimension a percentage refers to
///
/// <https://www.w3.org/TR/SVG/coords.html#Units>
#[derive(Debug, Clone, Copy, PartialEq)]
enum Axis {
    X,
    Y,
    /// `sqrt(w² + h²) / sqrt(2)`, used by radii and stroke widths
    Diagonal,
}

impl Axis {
    fn of_attribute(attr: &str) -> Self {
        match attr {
            "x" | "cx" | "rx" | "width" => Axis::X,
            "y" | "cy" | "ry" | "height" => Axis::Y,
            _ => Axis::Diagonal,
        }
    }
}

/// User units in one `unit`, for units that do not depend on a viewport
fn user_units_per(unit: LengthUnit) -> Option<f64> {
    use uom::si::f64::Length as PhysicalLength;
    use uom::si::length::{centimeter, inch, millimeter, pica_computer, point_computer};

    let at_css_dpi = |length: PhysicalLength| length.get::<inch>() * CSS_DEFAULT_DPI;

    match unit {
        LengthUnit::None | LengthUnit::Px => Some(1.),
        LengthUnit::In => Some(CSS_DEFAULT_DPI),
        LengthUnit::Cm => Some(at_css_dpi(PhysicalLength::new::<centimeter>(1.))),
        LengthUnit::Mm => Some(at_css_dpi(PhysicalLength::new::<millimeter>(1.))),
        LengthUnit::Pt => Some(at_css_dpi(PhysicalLength::new::<point_computer>(1.))),
        LengthUnit::Pc => Some(at_css_dpi(PhysicalLength::new::<pica_computer>(1.))),
        LengthUnit::Em | LengthUnit::Ex | LengthUnit::Percent => None,
    }
}

/// Converts numeric attributes into user units at the element parse boundary
#[derive(Debug, Clone, Default)]
pub struct UnitResolver {
    /// Width and height of the root viewBox, if there is one
    pub viewport: Option<[f64; 2]>,
}

impl UnitResolver {
    /// Plain number attribute, e.g. `fill-opacity`. Missing attributes are `None`.
    pub fn number_attr(&self, node: &Node, attr: &str) -> Result<Option<f64>, Error> {
        let Some(value) = node.attribute(attr) else {
            return Ok(None);
        };
        value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid_number(node, attr, value))
    }

    /// Length attribute in user units. Missing attributes are `None`.
    pub fn length_attr(&self, node: &Node, attr: &str) -> Result<Option<f64>, Error> {
        let Some(value) = node.attribute(attr) else {
            return Ok(None);
        };
        let length = Length::from_str(value.trim()).map_err(|_| invalid_number(node, attr, value))?;
        Ok(Some(self.to_user_units(length, Axis::of_attribute(attr))))
    }

    fn to_user_units(&self, length: Length, axis: Axis) -> f64 {
        if let Some(scale) = user_units_per(length.unit) {
            return length.number * scale;
        }

        match length.unit {
            LengthUnit::Percent => match self.viewport {
                Some([width, height]) => {
                    let reference = match axis {
                        Axis::X => width,
                        Axis::Y => height,
                        Axis::Diagonal => width.hypot(height) / std::f64::consts::SQRT_2,
                    };
                    length.number / 100. * reference
                }
                None => {
                    warn!("Percentage {}% used without a viewBox, taking it as a fraction", length.number);
                    length.number / 100.
                }
            },
            _ => {
                warn!("Assuming 1em/ex = {ASSUMED_FONT_SIZE}px");
                length.number * ASSUMED_FONT_SIZE
            }
        }
    }
}

fn invalid_number(node: &Node, attr: &str, value: &str) -> Error {
    Error::InvalidNumber {
        element: node.tag_name().name().to_string(),
        attribute: attr.to_string(),
        value: value.to_string(),
    }
}
