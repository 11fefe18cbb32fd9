//! Node classification
//!
//! Every component of the pipeline asks the same questions about a value
//! ("is it an element?", "does it carry a style marker?"). They are answered
//! here, once, from the explicit fields of the tree model.

use crate::node::{Node, Origin, Value};

/// Prop holding the style marker (serialized styles, a raw CSS string or a
/// sequence of either)
pub const STYLE_PROP: &str = "css";

/// Prop holding the element type the style marker wraps
pub const REAL_TYPE_PROP: &str = "__STYLE_TYPE_PLEASE_DO_NOT_USE__";

/// Prop holding the label the styling runtime derived from the call site
pub const LABEL_PROP: &str = "__STYLE_LABEL_PLEASE_DO_NOT_USE__";

/// Type name of the internal wrapper a shallow render leaves in place of the
/// styled element
pub const STYLE_MARKER_INTERNAL_TYPE: &str = "CssPropInternal";

/// Props that only exist to carry style-marker data
pub const STYLE_MARKER_PROPS: [&str; 3] = [STYLE_PROP, REAL_TYPE_PROP, LABEL_PROP];

/// Result of classifying a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeClass<'a> {
    Primitive,
    /// Style-marker wrapper left by a shallow render
    ShallowStyleMarker(&'a Node),
    /// Style-marker element whose children reflect a real render
    StyleMarker(&'a Node),
    /// Any other renderable element
    Renderable(&'a Node),
    /// Raw markup element
    Markup(&'a Node),
    Other,
}

pub fn classify(value: &Value) -> NodeClass<'_> {
    let node = match value {
        Value::Primitive(_) => return NodeClass::Primitive,
        Value::Node(node) => node,
        _ => return NodeClass::Other,
    };

    match node.origin {
        Origin::Element | Origin::TestJson => {
            if is_shallow_marker_node(node) {
                NodeClass::ShallowStyleMarker(node)
            } else if node.has_prop(REAL_TYPE_PROP) {
                NodeClass::StyleMarker(node)
            } else {
                NodeClass::Renderable(node)
            }
        }
        Origin::Markup => NodeClass::Markup(node),
        Origin::Object => NodeClass::Other,
    }
}

fn is_shallow_marker_node(node: &Node) -> bool {
    node.origin == Origin::TestJson
        && node.node_type.name() == Some(STYLE_MARKER_INTERNAL_TYPE)
        && node.has_prop(REAL_TYPE_PROP)
}

pub fn is_primitive(value: &Value) -> bool {
    value.is_primitive()
}

pub fn is_renderable_element(value: &Value) -> bool {
    matches!(
        value,
        Value::Node(Node {
            origin: Origin::Element | Origin::TestJson,
            ..
        })
    )
}

pub fn is_markup_element(value: &Value) -> bool {
    matches!(
        value,
        Value::Node(Node {
            origin: Origin::Markup,
            ..
        })
    )
}

pub fn is_style_marker_element(value: &Value) -> bool {
    matches!(classify(value), NodeClass::StyleMarker(_))
}

pub fn is_shallow_style_marker_element(value: &Value) -> bool {
    matches!(classify(value), NodeClass::ShallowStyleMarker(_))
}
