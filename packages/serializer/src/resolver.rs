//! Style marker resolution
//!
//! Rewrites nodes that carry a style marker so that shallow and fully
//! rendered trees print the same way:
//!
//! - A shallow wrapper either gets a synthesized `className` and the type it
//!   stands for, or, when one of its children already carries the resolved
//!   class, is replaced by that child.
//! - A rendered marker element loses its marker props and takes its real type.
//! - Every other renderable element is copied so later passes own it.

use crate::error::{SnapshotError, SnapshotResult};
use regex::Regex;
use std::sync::LazyLock;
use stylesnap_tree::{
    classify, ComponentRef, Node, NodeClass, NodeOverrides, NodeType, Primitive, Props,
    SerializedStyles, Transformed, Value, REAL_TYPE_PROP, STYLE_MARKER_PROPS, STYLE_PROP,
};
use tracing::trace;

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[;{\s])label:\s*([^\s;{}]+)").expect("label pattern is valid")
});

/// One entry of a style marker
#[derive(Debug, Clone, Copy, PartialEq)]
enum MarkerEntry<'a> {
    Serialized(&'a SerializedStyles),
    Raw(&'a str),
}

impl<'a> MarkerEntry<'a> {
    fn css(&self) -> &'a str {
        match *self {
            MarkerEntry::Serialized(styles) => styles.styles.as_deref().unwrap_or_default(),
            MarkerEntry::Raw(css) => css,
        }
    }

    fn name(&self) -> Option<&'a str> {
        match *self {
            MarkerEntry::Serialized(styles) => styles.name.as_deref(),
            MarkerEntry::Raw(_) => None,
        }
    }
}

fn marker_entries(marker: Option<&Value>) -> Vec<MarkerEntry<'_>> {
    fn collect<'a>(value: &'a Value, entries: &mut Vec<MarkerEntry<'a>>) {
        match value {
            Value::Style(styles) => entries.push(MarkerEntry::Serialized(styles)),
            Value::Primitive(Primitive::String(css)) => entries.push(MarkerEntry::Raw(css)),
            Value::Array(items) => {
                for item in items {
                    collect(item, entries);
                }
            }
            _ => {}
        }
    }

    let mut entries = Vec::new();
    if let Some(marker) = marker {
        collect(marker, &mut entries);
    }
    entries
}

/// Every `label:` value found in the marker's CSS text, in order
pub fn extract_labels(marker: Option<&Value>) -> Vec<String> {
    marker_entries(marker)
        .iter()
        .flat_map(|entry| {
            LABEL_PATTERN
                .captures_iter(entry.css())
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|label| !label.is_empty())
        .collect()
}

/// Class-name tokens the marker's names imply
pub fn marker_class_tokens(marker: Option<&Value>) -> Vec<String> {
    let names: Vec<&str> = marker_entries(marker)
        .iter()
        .filter_map(MarkerEntry::name)
        .collect();
    names
        .join(" ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// `<key>-<token>` for every token and key
pub fn expected_class_names(tokens: &[String], keys: &[String]) -> Vec<String> {
    tokens
        .iter()
        .flat_map(|token| keys.iter().map(move |key| format!("{}-{}", key, token)))
        .collect()
}

fn class_tokens(node: &Node) -> impl Iterator<Item = &str> {
    node.class_name()
        .unwrap_or_default()
        .split(' ')
        .filter(|t| !t.is_empty())
}

/// Whether `class_name` is the resolved form of the marker: one of the
/// expected names, or, for a labelled marker, a keyed class whose `-`
/// segments contain every label as a run of whole segments
fn is_resolved_class(class_name: &str, keys: &[String], labels: &[String], expected: &[String]) -> bool {
    if expected.iter().any(|e| e == class_name) {
        return true;
    }
    if labels.is_empty() {
        return false;
    }
    keys.iter().any(|key| {
        let Some(rest) = class_name
            .strip_prefix(key.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            return false;
        };
        let segments = format!("-{}-", rest);
        labels
            .iter()
            .all(|label| segments.contains(&format!("-{}-", label)))
    })
}

/// First immediate child that already carries the resolved class
fn resolved_child<'a>(
    node: &'a Node,
    keys: &[String],
    labels: &[String],
    expected: &[String],
) -> Option<&'a Value> {
    node.children.iter().flatten().find(|child| {
        child.as_node().is_some_and(|child| {
            class_tokens(child).any(|token| is_resolved_class(token, keys, labels, expected))
        })
    })
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "nothing".to_string(),
        Some(Value::Primitive(Primitive::Null)) => "null".to_string(),
        Some(Value::Primitive(Primitive::Bool(_))) => "a boolean".to_string(),
        Some(Value::Primitive(Primitive::Number(_))) => "a number".to_string(),
        Some(Value::Primitive(Primitive::String(_))) => "a string".to_string(),
        Some(Value::Component(_)) => "an anonymous component".to_string(),
        Some(Value::Array(_)) => "an array".to_string(),
        Some(Value::Node(_)) => "an element".to_string(),
        Some(Value::Style(_)) => "a style object".to_string(),
        Some(Value::Object(_)) => "an object".to_string(),
    }
}

/// The element type a marker stands for
fn real_type(node: &Node) -> SnapshotResult<NodeType> {
    match node.prop(REAL_TYPE_PROP) {
        Some(Value::Primitive(Primitive::String(tag))) => Ok(NodeType::Tag(tag.clone())),
        Some(Value::Component(component)) if component.display_name().is_some() => {
            Ok(NodeType::Component(component.clone()))
        }
        other => Err(SnapshotError::InvalidElementType {
            node: node.node_type.to_string(),
            found: describe(other),
        }),
    }
}

fn without_marker_props(props: &Props) -> Props {
    props
        .iter()
        .filter(|(name, _)| !STYLE_MARKER_PROPS.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn resolve_shallow(node: &Node, keys: &[String]) -> SnapshotResult<Transformed> {
    let marker = node.prop(STYLE_PROP);
    let labels = extract_labels(marker);
    let tokens = marker_class_tokens(marker);
    let expected = expected_class_names(&tokens, keys);

    if let Some(child) = resolved_child(node, keys, &labels, &expected) {
        trace!(node = %node.node_type, "Unwrapping shallow marker into its resolved child");
        return Ok(Transformed::Replaced(child.clone()));
    }

    let class_name = node
        .class_name()
        .filter(|c| !c.is_empty())
        .into_iter()
        .map(str::to_string)
        .chain(expected)
        .collect::<Vec<_>>()
        .join(" ");
    trace!(node = %node.node_type, class_name = %class_name, "Synthesizing className for shallow marker");

    // Shallow output names the type; a component stands in by its name
    let node_type = match real_type(node)? {
        NodeType::Component(ComponentRef { name }) => NodeType::Tag(name),
        tag => tag,
    };

    let mut props = without_marker_props(&node.props);
    props.insert("className".to_string(), Value::from(class_name));

    Ok(Transformed::Replaced(Value::Node(node.clone_with(NodeOverrides {
        node_type: Some(node_type),
        props: Some(props),
        ..Default::default()
    }))))
}

fn resolve_rendered(node: &Node) -> SnapshotResult<Transformed> {
    let node_type = real_type(node)?;
    Ok(Transformed::Replaced(Value::Node(node.clone_with(NodeOverrides {
        node_type: Some(node_type),
        props: Some(without_marker_props(&node.props)),
        ..Default::default()
    }))))
}

/// Rewrite one value; `keys` are the registry keys of the current call
pub fn convert_style_markers(value: &Value, keys: &[String]) -> SnapshotResult<Transformed> {
    match classify(value) {
        NodeClass::ShallowStyleMarker(node) => resolve_shallow(node, keys),
        NodeClass::StyleMarker(node) => resolve_rendered(node),
        NodeClass::Renderable(node) => Ok(Transformed::Replaced(Value::Node(
            node.clone_with(NodeOverrides::default()),
        ))),
        NodeClass::Primitive | NodeClass::Markup(_) | NodeClass::Other => Ok(Transformed::Unchanged),
    }
}

/// Transform function for [`stylesnap_tree::deep_transform`], closing over
/// the registry keys of one serialize call
pub fn create_marker_converter(
    keys: &[String],
) -> impl FnMut(&Value) -> SnapshotResult<Transformed> + '_ {
    move |value: &Value| convert_style_markers(value, keys)
}
