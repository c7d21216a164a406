use std::collections::HashSet;

use log::debug;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Warning};
use crate::features::unsupported_features;
use crate::model::{Metadata, Model, PathNode};
use crate::style::resolve_style;

pub use self::context::{join_transforms, Context, Presentation};
use self::element::{Drawable, Element, Use};
pub use self::element::parse_view_box;
pub use self::names::{assign_unique_ids, ConvertedNode};
use self::names::element_name;
pub use self::normalize::{normalize, normalize_segments, parse_transform};
pub use self::path::{canonicalize, elevate_quadratics};
use self::units::UnitResolver;

mod context;
mod element;
mod names;
mod normalize;
mod path;
mod shapes;
mod units;

/// Options are specific to a conversion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Replace quadratic curves with the equivalent cubic curves.
    ///
    /// Useful for consumers that can only draw cubic Béziers.
    pub convert_quadratics_to_cubics: bool,
}

/// A converted document together with the recoverable problems found on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub model: Model,
    pub warnings: Vec<Warning>,
}

/// Maps SVG [`Node`]s and their attributes into a flat list of [`PathNode`]s
struct ConversionVisitor<'a, 'input: 'a> {
    doc: &'a Document<'input>,
    options: &'a ConversionOptions,
    units: UnitResolver,
    warnings: Vec<Warning>,
}

impl<'a, 'input: 'a> ConversionVisitor<'a, 'input> {
    /// Convert sibling nodes in document order, appending to `acc`.
    ///
    /// Groups are flattened: their children are converted in place with the
    /// group's attributes merged into the context.
    fn convert_nodes(
        &mut self,
        nodes: impl Iterator<Item = Node<'a, 'input>>,
        parent_path: &[String],
        context: &Context,
        mut acc: Vec<ConvertedNode>,
    ) -> Result<Vec<ConvertedNode>, Error> {
        for (index, node) in nodes.filter(Node::is_element).enumerate() {
            let name = element_name(node.attribute("id"), node.tag_name().name(), index);
            let mut path = parent_path.to_vec();
            path.push(name);

            match Element::from_node(&node, &self.units)? {
                Element::Group { presentation } => {
                    let child_context = presentation.merged_over(context);
                    acc = self.convert_nodes(node.children(), &path, &child_context, acc)?;
                }
                Element::Drawable(drawable) => {
                    let node = self.path_node(&drawable, context)?;
                    acc.push(ConvertedNode { path, node });
                }
                Element::Use(reference) => {
                    let mut visited: HashSet<String> = node.attribute("id").map(str::to_string).into_iter().collect();
                    if let Some(node) = self.resolve_use(reference, context, &mut visited)? {
                        acc.push(ConvertedNode { path, node });
                    }
                }
                Element::Root { .. } | Element::Hidden => {}
                Element::Unknown => debug!("Skipping unsupported element <{}>", node.tag_name().name()),
            }
        }

        Ok(acc)
    }

    fn path_node(&mut self, drawable: &Drawable, context: &Context) -> Result<PathNode, Error> {
        let transform = join_transforms(
            context.transform.as_deref(),
            drawable.presentation.transform.as_deref(),
        )
        .unwrap_or_default();

        let segments = normalize_segments(drawable.shape.segments(&mut self.warnings), &transform)?;
        let mut commands = canonicalize(&segments, &mut self.warnings);
        if self.options.convert_quadratics_to_cubics {
            commands = elevate_quadratics(commands);
        }

        Ok(PathNode {
            id: String::new(),
            commands,
            style: resolve_style(&drawable.presentation, context, &mut self.warnings),
        })
    }

    /// First element in document order with the given id
    fn find_definition(&self, id: &str) -> Option<Node<'a, 'input>> {
        self.doc
            .descendants()
            .find(|node| node.is_element() && node.attribute("id") == Some(id))
    }

    /// Resolve a `<use>` to the path it draws.
    ///
    /// The `use` element's presentation attributes act as inherited context
    /// for the referenced element, whose own attributes still win. Chains of
    /// `use` elements are followed; `visited` holds the ids seen so far.
    fn resolve_use(
        &mut self,
        reference: Use,
        context: &Context,
        visited: &mut HashSet<String>,
    ) -> Result<Option<PathNode>, Error> {
        let Some(id) = reference.href.filter(|href| !href.is_empty()) else {
            Warning::MissingHref {
                element: "use".to_string(),
            }
            .report(&mut self.warnings);
            return Ok(None);
        };

        if !visited.insert(id.clone()) {
            Warning::CyclicReference { id }.report(&mut self.warnings);
            return Ok(None);
        }

        let Some(target) = self.find_definition(&id) else {
            Warning::UnresolvedReference { id }.report(&mut self.warnings);
            return Ok(None);
        };

        let mut use_context = reference.presentation.merged_over(context);
        if reference.x != 0. || reference.y != 0. {
            use_context = use_context.then_transform(&format!("translate({} {})", reference.x, reference.y));
        }

        match Element::from_node(&target, &self.units)? {
            Element::Drawable(drawable) => Ok(Some(self.path_node(&drawable, &use_context)?)),
            Element::Use(inner) => self.resolve_use(inner, &use_context, visited),
            _ => {
                Warning::UnresolvedReference { id }.report(&mut self.warnings);
                Ok(None)
            }
        }
    }
}

/// Top-level function for converting an SVG [`Document`] into a [`Model`]
pub fn svg2model(doc: &Document, options: &ConversionOptions) -> Result<Conversion, Error> {
    let root = doc.root_element();

    let mut visitor = ConversionVisitor {
        doc,
        options,
        units: UnitResolver::default(),
        warnings: vec![],
    };

    // Percentages resolve against the root viewBox, so read it first
    let view_box = if root.tag_name().name() == "svg" {
        root.attribute("viewBox").and_then(parse_view_box)
    } else {
        None
    };
    visitor.units.viewport = view_box.map(|v| [v.width, v.height]);

    let mut converted = match Element::from_node(&root, &visitor.units)? {
        Element::Root { presentation, .. } => {
            visitor.convert_nodes(root.children(), &[], &presentation, vec![])?
        }
        _ => visitor.convert_nodes(std::iter::once(root), &[], &Context::default(), vec![])?,
    };
    assign_unique_ids(&mut converted);

    Ok(Conversion {
        model: Model {
            children: converted.into_iter().map(|c| c.node).collect(),
            view_box,
            metadata: Metadata {
                unsupported_features: unsupported_features(doc),
            },
        },
        warnings: visitor.warnings,
    })
}
