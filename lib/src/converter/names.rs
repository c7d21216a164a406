use std::collections::HashMap;

use crate::model::PathNode;

/// An output node together with the names of its ancestors and itself
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedNode {
    pub path: Vec<String>,
    pub node: PathNode,
}

/// Split into lowercase words on non-alphanumerics and case boundaries.
///
/// `"fooBar"`, `"foo-bar"`, and `"FOO_BAR"` all give `["foo", "bar"]`;
/// `"HTMLParser"` gives `["html", "parser"]`.
fn words(s: &str) -> Vec<String> {
    let mut words = vec![];
    let mut current = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"my-icon"` → `"myIcon"`
pub fn lower_camel_case(s: &str) -> String {
    words(s)
        .iter()
        .enumerate()
        .map(|(i, word)| if i == 0 { word.clone() } else { capitalize(word) })
        .collect()
}

/// `"my-icon"` → `"MyIcon"`
pub fn upper_camel_case(s: &str) -> String {
    words(s).iter().map(|word| capitalize(word)).collect()
}

/// Name of an element within its parent: its id if it has one, otherwise its
/// tag name and position among its element siblings
pub fn element_name(id: Option<&str>, tag_name: &str, index: usize) -> String {
    id.map(upper_camel_case)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{tag_name}{index}"))
}

fn short_name(path: &[String]) -> String {
    path.last().map(|last| lower_camel_case(last)).unwrap_or_default()
}

/// Give every node a document-wide unique id.
///
/// A node whose short name (its own camel-cased name) no other node shares
/// keeps it; otherwise it gets its full path joined with `.`.
pub fn assign_unique_ids(converted: &mut [ConvertedNode]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for c in converted.iter() {
        *counts.entry(short_name(&c.path)).or_default() += 1;
    }

    for c in converted.iter_mut() {
        let name = short_name(&c.path);
        c.node.id = if counts.get(&name) == Some(&1) {
            name
        } else {
            c.path.join(".")
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::style::Style;

    fn converted(path: &[&str]) -> ConvertedNode {
        ConvertedNode {
            path: path.iter().map(|s| s.to_string()).collect(),
            node: PathNode {
                id: String::new(),
                commands: vec![],
                style: Style::default(),
            },
        }
    }

    #[test]
    fn camel_cases_like_identifiers() {
        assert_eq!(lower_camel_case("my-icon"), "myIcon");
        assert_eq!(lower_camel_case("Icon"), "icon");
        assert_eq!(lower_camel_case("fooBar_baz"), "fooBarBaz");
        assert_eq!(lower_camel_case("HTMLParser"), "htmlParser");
        assert_eq!(lower_camel_case("path3"), "path3");
        assert_eq!(upper_camel_case("check circle"), "CheckCircle");
        assert_eq!(upper_camel_case("--"), "");
    }

    #[test]
    fn element_names_prefer_ids() {
        assert_eq!(element_name(Some("my-icon"), "path", 2), "MyIcon");
        assert_eq!(element_name(None, "path", 2), "path2");
        assert_eq!(element_name(Some("__"), "rect", 0), "rect0");
    }

    #[test]
    fn colliding_names_use_full_path() {
        let mut nodes = vec![
            converted(&["Group", "Icon"]),
            converted(&["Group", "Icon"]),
            converted(&["Badge"]),
        ];
        assign_unique_ids(&mut nodes);
        let ids: Vec<_> = nodes.iter().map(|c| c.node.id.as_str()).collect();
        assert_eq!(ids, ["Group.Icon", "Group.Icon", "badge"]);
    }

    #[test]
    fn collisions_are_detected_after_casing() {
        let mut nodes = vec![converted(&["A", "MyIcon"]), converted(&["B", "myIcon"])];
        assign_unique_ids(&mut nodes);
        assert_eq!(nodes[0].node.id, "A.MyIcon");
        assert_eq!(nodes[1].node.id, "B.myIcon");
    }
}
