use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Props of a node, ordered by name.
pub type Props = BTreeMap<String, Value>;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a node allocation.
///
/// `Clone` keeps the id (the clone is the same node handed around), while
/// [`Node::renew`], [`Node::clone_with`] and [`Node::override_with`] allocate a
/// new one. Equality of nodes never looks at the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Render marker the UI framework stamps on an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Element description produced by a component render call
    Element,
    /// Rendered JSON produced by a test renderer (full or shallow)
    TestJson,
    /// Raw markup (DOM) element
    Markup,
    /// Anything else shaped like a node
    Object,
}

/// Reference to a composite component (function or class).
///
/// An empty name means the component is anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentRef {
    #[serde(rename = "component")]
    pub name: String,
}

impl ComponentRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn anonymous() -> Self {
        Self {
            name: String::new(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}

/// Serialized style produced by the styling runtime for a `css` prop.
///
/// Both fields are optional: markers coming from hand-written fixtures or
/// older runtimes may omit either one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializedStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<String>,
}

impl SerializedStyles {
    pub fn new(name: impl Into<String>, styles: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            styles: Some(styles.into()),
        }
    }
}

/// Leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

/// Element type: a tag name or a composite component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeType {
    Tag(String),
    Component(ComponentRef),
}

impl NodeType {
    /// Tag name or component display name
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeType::Tag(tag) => Some(tag),
            NodeType::Component(component) => component.display_name(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Unknown"))
    }
}

impl From<&str> for NodeType {
    fn from(tag: &str) -> Self {
        NodeType::Tag(tag.to_string())
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        NodeType::Tag(tag)
    }
}

impl From<ComponentRef> for NodeType {
    fn from(component: ComponentRef) -> Self {
        NodeType::Component(component)
    }
}

/// Any value that can appear in a tree: as the root, a child or a prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Primitive(Primitive),
    Array(Vec<Value>),
    Node(Node),
    Component(ComponentRef),
    Style(SerializedStyles),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn null() -> Self {
        Value::Primitive(Primitive::Null)
    }

    /// Parse a tree from its JSON fixture form
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Primitive(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Primitive(Primitive::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Primitive(Primitive::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Primitive(Primitive::String(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Primitive(Primitive::Bool(b))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Primitive(Primitive::Number(n))
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<SerializedStyles> for Value {
    fn from(styles: SerializedStyles) -> Self {
        Value::Style(styles)
    }
}

impl From<ComponentRef> for Value {
    fn from(component: ComponentRef) -> Self {
        Value::Component(component)
    }
}

/// One rendered unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(skip, default = "NodeId::fresh")]
    id: NodeId,
    #[serde(rename = "$$typeof")]
    pub origin: Origin,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Fields replaced by [`Node::clone_with`] / [`Node::override_with`].
/// `None` keeps the source's value.
#[derive(Debug, Clone, Default)]
pub struct NodeOverrides {
    pub node_type: Option<NodeType>,
    pub props: Option<Props>,
    pub children: Option<Vec<Value>>,
}

impl Node {
    pub fn new(origin: Origin, node_type: impl Into<NodeType>) -> Self {
        Self {
            id: NodeId::fresh(),
            origin,
            node_type: node_type.into(),
            props: Props::new(),
            children: None,
            key: None,
        }
    }

    pub fn element(node_type: impl Into<NodeType>) -> Self {
        Self::new(Origin::Element, node_type)
    }

    pub fn test_json(node_type: impl Into<NodeType>) -> Self {
        Self::new(Origin::TestJson, node_type)
    }

    pub fn markup(tag: impl Into<String>) -> Self {
        Self::new(Origin::Markup, NodeType::Tag(tag.into()))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn has_prop(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    /// `className` prop when it is a string
    pub fn class_name(&self) -> Option<&str> {
        self.prop("className").and_then(Value::as_str)
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_class_name(self, class_name: impl Into<String>) -> Self {
        self.with_prop("className", Value::from(class_name.into()))
    }

    pub fn with_child(mut self, child: impl Into<Value>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    pub fn with_children(mut self, new_children: Vec<Value>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(new_children);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Same fields, new identity
    pub fn renew(mut self) -> Self {
        self.id = NodeId::fresh();
        self
    }

    /// Copy every field of `self` into a new node, then apply `overrides`
    pub fn clone_with(&self, overrides: NodeOverrides) -> Self {
        self.clone().override_with(overrides)
    }

    /// Consuming form of [`Node::clone_with`]
    pub fn override_with(self, overrides: NodeOverrides) -> Self {
        let mut node = self.renew();
        if let Some(node_type) = overrides.node_type {
            node.node_type = node_type;
        }
        if let Some(props) = overrides.props {
            node.props = props;
        }
        if let Some(children) = overrides.children {
            node.children = Some(children);
        }
        node
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.node_type == other.node_type
            && self.props == other.props
            && self.children == other.children
            && self.key == other.key
    }
}
