//! # Stylesnap Tree
//!
//! The tree model shared by every stage of the snapshot pipeline, together
//! with the two pure tree operations the pipeline is built from:
//!
//! - [`get_nodes`] flattens a tree into its nodes in document order.
//! - [`deep_transform`] rewrites a tree top-down into a new tree.
//!
//! Inputs are never mutated. Node identity ([`NodeId`]) is explicit so that
//! callers can track "this exact node" independently of structural equality.

pub mod node;
pub mod predicates;
pub mod transform;
pub mod visitor;

pub use node::{
    ComponentRef, Node, NodeId, NodeOverrides, NodeType, Origin, Primitive, Props,
    SerializedStyles, Value,
};
pub use predicates::{
    classify, is_markup_element, is_primitive, is_renderable_element,
    is_shallow_style_marker_element, is_style_marker_element, NodeClass, LABEL_PROP,
    REAL_TYPE_PROP, STYLE_MARKER_INTERNAL_TYPE, STYLE_MARKER_PROPS, STYLE_PROP,
};
pub use transform::{deep_transform, Transformed};
pub use visitor::{get_nodes, walk_node, walk_node_mut, walk_value, walk_value_mut, Visitor, VisitorMut};
