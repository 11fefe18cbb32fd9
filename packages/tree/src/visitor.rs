use crate::node::{Node, Value};

/// Visitor pattern for traversing trees immutably
///
/// Default implementations walk the whole tree depth-first in document order.
/// Arrays are traversed but have no visit hook of their own; primitives and
/// prop values are never entered.
pub trait Visitor<'a>: Sized {
    fn visit_value(&mut self, value: &'a Value) {
        walk_value(self, value);
    }

    fn visit_node(&mut self, node: &'a Node) {
        walk_node(self, node);
    }
}

/// Mutable visitor pattern for rewriting owned trees in place
pub trait VisitorMut: Sized {
    fn visit_value_mut(&mut self, value: &mut Value) {
        walk_value_mut(self, value);
    }

    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }
}

pub fn walk_value<'a, V: Visitor<'a>>(visitor: &mut V, value: &'a Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                visitor.visit_value(item);
            }
        }
        Value::Node(node) => visitor.visit_node(node),
        _ => {
            // Leaf, nothing to walk
        }
    }
}

pub fn walk_node<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Node) {
    if let Some(children) = &node.children {
        for child in children {
            visitor.visit_value(child);
        }
    }
}

pub fn walk_value_mut<V: VisitorMut>(visitor: &mut V, value: &mut Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                visitor.visit_value_mut(item);
            }
        }
        Value::Node(node) => visitor.visit_node_mut(node),
        _ => {}
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    if let Some(children) = &mut node.children {
        for child in children {
            visitor.visit_value_mut(child);
        }
    }
}

struct NodeCollector<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> Visitor<'a> for NodeCollector<'a> {
    fn visit_node(&mut self, node: &'a Node) {
        // Parents come before their children
        self.nodes.push(node);
        walk_node(self, node);
    }
}

/// Flatten a tree into every node reachable from `root`, in document order
pub fn get_nodes(root: &Value) -> Vec<&Node> {
    let mut collector = NodeCollector { nodes: Vec::new() };
    collector.visit_value(root);
    collector.nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_names<'a>(nodes: &[&'a Node]) -> Vec<&'a str> {
        nodes.iter().copied().filter_map(|n| n.node_type.name()).collect()
    }

    #[test]
    fn test_single_node() {
        let root = Value::from(Node::element("div"));
        assert_eq!(type_names(&get_nodes(&root)), vec!["div"]);
    }

    #[test]
    fn test_primitive_root_has_no_nodes() {
        assert!(get_nodes(&Value::from("text")).is_empty());
        assert!(get_nodes(&Value::null()).is_empty());
    }

    #[test]
    fn test_document_order() {
        let root = Value::from(
            Node::element("section")
                .with_child(Node::element("h1").with_child("Title"))
                .with_child(
                    Node::element("div")
                        .with_child(Node::element("p"))
                        .with_child(Node::element("span")),
                )
                .with_child(Node::element("footer")),
        );

        assert_eq!(
            type_names(&get_nodes(&root)),
            vec!["section", "h1", "div", "p", "span", "footer"]
        );
    }

    #[test]
    fn test_arrays_are_traversed_not_emitted() {
        let root = Value::Array(vec![
            Value::from(Node::element("a")),
            Value::Array(vec![Value::from(Node::element("b")), Value::from("text")]),
            Value::from(Node::element("c").with_children(vec![Value::Array(vec![Value::from(
                Node::element("d"),
            )])])),
        ]);

        assert_eq!(type_names(&get_nodes(&root)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_prop_values_are_not_entered() {
        let root = Value::from(Node::element("div").with_prop("icon", Node::element("svg")));
        assert_eq!(type_names(&get_nodes(&root)), vec!["div"]);
    }

    #[test]
    fn test_mutable_walk_reaches_nested_nodes() {
        struct Tagger;
        impl VisitorMut for Tagger {
            fn visit_node_mut(&mut self, node: &mut Node) {
                node.props.insert("seen".to_string(), Value::from(true));
                walk_node_mut(self, node);
            }
        }

        let mut root = Value::Array(vec![Value::from(
            Node::element("div").with_child(Node::element("span")),
        )]);
        Tagger.visit_value_mut(&mut root);

        let nodes = get_nodes(&root);
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.prop("seen") == Some(&Value::from(true))));
    }
}
