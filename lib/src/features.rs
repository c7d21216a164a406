//! Report the parts of a document the converter ignores.

use roxmltree::{Document, Node};

use crate::style::parse_css_color;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

pub const SUPPORTED_ELEMENT_NAMES: &[&str] = &[
    "circle", "defs", "desc", "g", "mask", "path", "polygon", "polyline", "rect", "svg", "title", "use",
];

pub const SUPPORTED_ATTRIBUTE_NAMES: &[&str] = &[
    "cx",
    "cy",
    "d",
    "fill-opacity",
    "fill-rule",
    "fill",
    "height",
    "href",
    "id",
    "points",
    "r",
    "rx",
    "ry",
    "stroke-linecap",
    "stroke-opacity",
    "stroke-width",
    "stroke",
    "transform",
    "viewBox",
    "width",
    "x",
    "xlink:href",
    "xmlns",
    "xmlns:xlink",
    "y",
];

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Name as written in the source, e.g. `xlink:href` or `inkscape:label`.
///
/// Names in the SVG namespace, or in none, stay bare.
fn qualified_name(node: &Node, namespace: Option<&str>, name: &str) -> String {
    let prefix = match namespace {
        None | Some(SVG_NS) => None,
        Some(uri) => node.lookup_prefix(uri).or(match uri {
            XLINK_NS => Some("xlink"),
            XML_NS => Some("xml"),
            _ => None,
        }),
    };
    match prefix {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_string(),
    }
}

/// Unsupported elements, then `element.attribute` pairs, then
/// `element.fill.value` / `element.stroke.value` for paints that cannot be
/// drawn. Each group is deduplicated and in document order.
///
/// Attributes of unsupported elements are not inspected.
pub fn unsupported_features(doc: &Document) -> Vec<String> {
    let mut elements = vec![];
    let mut attributes = vec![];
    let mut values = vec![];

    for node in doc.root_element().descendants().filter(Node::is_element) {
        let tag_name = qualified_name(&node, node.tag_name().namespace(), node.tag_name().name());
        if !SUPPORTED_ELEMENT_NAMES.contains(&tag_name.as_str()) {
            push_unique(&mut elements, tag_name);
            continue;
        }

        for attribute in node.attributes() {
            let name = qualified_name(&node, attribute.namespace(), attribute.name());
            if !SUPPORTED_ATTRIBUTE_NAMES.contains(&name.as_str()) {
                push_unique(&mut attributes, format!("{tag_name}.{name}"));
                continue;
            }

            if name == "fill" || name == "stroke" {
                let value = attribute.value().trim();
                if value != "none" && parse_css_color(value).is_none() {
                    push_unique(&mut values, format!("{tag_name}.{name}.{value}"));
                }
            }
        }
    }

    elements.into_iter().chain(attributes).chain(values).collect()
}
