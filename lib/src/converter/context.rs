use roxmltree::Node;

use super::units::UnitResolver;
use crate::error::Error;

/// Presentation attributes that are inherited from ancestors.
///
/// The same record is used for an element's own attributes and for the
/// [`Context`] accumulated along the ancestor chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Presentation {
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub fill_rule: Option<String>,
    pub stroke: Option<String>,
    pub stroke_opacity: Option<f64>,
    pub stroke_width: Option<f64>,
    pub stroke_line_cap: Option<String>,
    /// Transform list, kept as text.
    ///
    /// Nested transforms are joined parent first, so parsing the joined list
    /// yields the composed matrix.
    pub transform: Option<String>,
}

/// Inherited attributes accumulated during the tree walk
pub type Context = Presentation;

impl Presentation {
    pub(crate) fn from_node(node: &Node, units: &UnitResolver) -> Result<Self, Error> {
        let text = |attr: &str| node.attribute(attr).map(str::to_string);

        Ok(Self {
            fill: text("fill"),
            fill_opacity: units.number_attr(node, "fill-opacity")?,
            fill_rule: text("fill-rule"),
            stroke: text("stroke"),
            stroke_opacity: units.number_attr(node, "stroke-opacity")?,
            stroke_width: units.length_attr(node, "stroke-width")?,
            stroke_line_cap: text("stroke-linecap"),
            transform: node
                .attribute("transform")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        })
    }

    /// Merge these attributes over a parent context.
    ///
    /// Values set here win; transforms concatenate as `parent child`.
    pub fn merged_over(self, parent: &Context) -> Context {
        Context {
            fill: self.fill.or_else(|| parent.fill.clone()),
            fill_opacity: self.fill_opacity.or(parent.fill_opacity),
            fill_rule: self.fill_rule.or_else(|| parent.fill_rule.clone()),
            stroke: self.stroke.or_else(|| parent.stroke.clone()),
            stroke_opacity: self.stroke_opacity.or(parent.stroke_opacity),
            stroke_width: self.stroke_width.or(parent.stroke_width),
            stroke_line_cap: self.stroke_line_cap.or_else(|| parent.stroke_line_cap.clone()),
            transform: join_transforms(parent.transform.as_deref(), self.transform.as_deref()),
        }
    }

    /// Append a transform applied after (inside) the existing one
    pub fn then_transform(mut self, transform: &str) -> Self {
        self.transform = join_transforms(self.transform.as_deref(), Some(transform));
        self
    }
}

pub fn join_transforms(outer: Option<&str>, inner: Option<&str>) -> Option<String> {
    match (outer, inner) {
        (Some(outer), Some(inner)) => Some(format!("{outer} {inner}")),
        (Some(t), None) | (None, Some(t)) => Some(t.to_string()),
        (None, None) => None,
    }
}
