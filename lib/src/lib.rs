//! Convert SVG documents into a flat list of styled paths.
//!
//! Groups are flattened, `<use>` references resolved, basic shapes turned into
//! path commands, and inherited styles and transforms folded into each path.

use roxmltree::Document;

/// Walks the SVG tree and produces path nodes
mod converter;
mod error;
/// Detects input the model cannot represent
mod features;
mod model;
/// Renders a model back into SVG
mod print;
mod style;

pub use converter::{
    assign_unique_ids, canonicalize, elevate_quadratics, join_transforms, normalize, normalize_segments,
    parse_transform, parse_view_box, svg2model, Context, Conversion, ConversionOptions, ConvertedNode, Presentation,
};
pub use error::{Error, Warning};
pub use features::{unsupported_features, SUPPORTED_ATTRIBUTE_NAMES, SUPPORTED_ELEMENT_NAMES};
pub use model::{Command, Metadata, Model, PathNode, Point, Rect};
pub use print::{print_svg, write_svg};
pub use style::{parse_css_color, resolve_style, FillRule, LineCap, Rgba, Style, DEFAULT_FILL};

/// Parse `svg` and convert it, discarding warnings after logging them
pub fn convert(svg: &str, options: &ConversionOptions) -> Result<Model, Error> {
    let document = Document::parse(svg)?;
    Ok(svg2model(&document, options)?.model)
}
