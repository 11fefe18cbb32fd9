//! Class-name collection, style lookup and cleanup of the transformed tree

use crate::css::CssFormatter;
use crate::registry::RegistrySnapshot;
use std::collections::HashSet;
use stylesnap_tree::{get_nodes, walk_node_mut, Node, Value, VisitorMut, STYLE_PROP};

/// Every class name present in the tree, in order of first appearance
pub fn collect_class_names(root: &Value) -> Vec<String> {
    class_names_from_nodes(&get_nodes(root))
}

pub fn class_names_from_nodes(nodes: &[&Node]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut class_names = Vec::new();
    for node in nodes {
        let Some(class_name) = node.class_name() else {
            continue;
        };
        for token in class_name.split(' ').filter(|t| !t.is_empty()) {
            if seen.insert(token) {
                class_names.push(token.to_string());
            }
        }
    }
    class_names
}

/// Formatted rule text for `class_names`, or an empty string
pub fn format_styles<F: CssFormatter + ?Sized>(
    snapshot: &RegistrySnapshot,
    class_names: &[String],
    formatter: &F,
    indent: &str,
) -> String {
    let css = snapshot.styles_for(class_names);
    if css.trim().is_empty() {
        return String::new();
    }
    formatter.format(&css, indent)
}

struct Cleaner<'a> {
    known: HashSet<&'a str>,
}

impl VisitorMut for Cleaner<'_> {
    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);

        let empty = match node.props.get("className") {
            None => return,
            Some(value) => value.as_str().map_or(value.is_null(), str::is_empty),
        };
        if empty {
            node.props.remove("className");
            return;
        }

        let known = node
            .class_name()
            .is_some_and(|c| c.split(' ').any(|token| self.known.contains(token)));
        if known {
            node.props.remove(STYLE_PROP);
        }
    }
}

/// Drop empty `className` props, and the style marker of nodes whose class
/// names are among `class_names`. Runs on a tree this call owns.
pub fn clean(root: &mut Value, class_names: &[String]) {
    let mut cleaner = Cleaner {
        known: class_names.iter().map(String::as_str).collect(),
    };
    cleaner.visit_value_mut(root);
}
