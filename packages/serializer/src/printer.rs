//! Pretty-printer collaborator
//!
//! The serializer only needs "print this tree"; [`Printer`] is that seam.
//! [`PrettyPrinter`] is the reference implementation used by the snapshot
//! entry points and tests. It asks its plugins first and falls back to its
//! own JSX-like formatting, calling back into itself (and so into the
//! plugins) for every nested value.

use crate::error::SnapshotResult;
use crate::options::PrintConfig;
use std::collections::BTreeMap;
use std::rc::Rc;
use stylesnap_tree::{ComponentRef, Node, NodeId, Primitive, SerializedStyles, Value};

/// Ancestors of the value being printed
pub type Refs = Vec<NodeId>;

pub trait Printer {
    fn print(
        &self,
        value: &Value,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
    ) -> SnapshotResult<String>;
}

/// Custom serializer consulted before default formatting
pub trait Plugin {
    fn test(&self, value: &Value) -> bool;

    fn serialize(
        &self,
        value: &Value,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
        printer: &dyn Printer,
    ) -> SnapshotResult<String>;
}

#[derive(Default, Clone)]
pub struct PrettyPrinter {
    plugins: Vec<Rc<dyn Plugin>>,
}

impl PrettyPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin(mut self, plugin: Rc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Print `value` as a snapshot root
    pub fn print_root(&self, value: &Value, config: &PrintConfig) -> SnapshotResult<String> {
        self.print(value, config, "", 0, &Refs::new())
    }

    fn print_node(
        &self,
        node: &Node,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
    ) -> SnapshotResult<String> {
        let type_name = node.node_type.to_string();
        let depth = depth + 1;
        if config.max_depth.is_some_and(|max| depth > max) {
            return Ok(format!("[{}]", type_name));
        }

        let mut refs = refs.clone();
        refs.push(node.id());
        let indentation_next = format!("{}{}", indentation, config.indent);

        let indentation_value = format!("{}{}", indentation_next, config.indent);
        let mut printed_props = String::new();
        for (key, value) in &node.props {
            let mut printed = self.print(value, config, &indentation_value, depth, &refs)?;
            if value.as_str().is_none() {
                if printed.contains('\n') {
                    printed = format!("\n{}{}\n{}", indentation_value, printed, indentation_next);
                }
                printed = format!("{{{}}}", printed);
            }
            printed_props.push_str(&format!("\n{}{}={}", indentation_next, key, printed));
        }

        let mut printed_children = String::new();
        for child in node.children.iter().flatten() {
            let printed = match child {
                Value::Primitive(Primitive::String(text)) => text.clone(),
                Value::Primitive(Primitive::Null | Primitive::Bool(_)) => continue,
                _ => self.print(child, config, &indentation_next, depth, &refs)?,
            };
            printed_children.push_str(&format!("\n{}{}", indentation_next, printed));
        }

        let mut out = format!("<{}", type_name);
        if !printed_props.is_empty() {
            out.push_str(&printed_props);
            out.push('\n');
            out.push_str(indentation);
        }
        if printed_children.is_empty() {
            if printed_props.is_empty() {
                out.push(' ');
            }
            out.push_str("/>");
        } else {
            out.push('>');
            out.push_str(&printed_children);
            out.push('\n');
            out.push_str(indentation);
            out.push_str(&format!("</{}>", type_name));
        }
        Ok(out)
    }

    fn print_list<'v>(
        &self,
        open: &str,
        close: &str,
        entries: impl Iterator<Item = (Option<String>, &'v Value)>,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
    ) -> SnapshotResult<String> {
        let indentation_next = format!("{}{}", indentation, config.indent);
        let mut body = String::new();
        for (label, value) in entries {
            let printed = self.print(value, config, &indentation_next, depth + 1, refs)?;
            match label {
                Some(label) => body.push_str(&format!("\n{}{}: {},", indentation_next, label, printed)),
                None => body.push_str(&format!("\n{}{},", indentation_next, printed)),
            }
        }
        if body.is_empty() {
            return Ok(format!("{}{}", open.trim_end(), close));
        }
        Ok(format!("{}{}\n{}{}", open, body, indentation, close))
    }

    fn print_basic(
        &self,
        value: &Value,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
    ) -> SnapshotResult<String> {
        let too_deep = config.max_depth.is_some_and(|max| depth >= max);
        match value {
            Value::Primitive(primitive) => Ok(print_primitive(primitive)),
            Value::Node(node) => self.print_node(node, config, indentation, depth, refs),
            Value::Component(component) => Ok(print_component(component)),
            Value::Array(_) if too_deep => Ok("[Array]".to_string()),
            Value::Array(items) => self.print_list(
                "Array [",
                "]",
                items.iter().map(|item| (None, item)),
                config,
                indentation,
                depth,
                refs,
            ),
            Value::Object(_) | Value::Style(_) if too_deep => Ok("[Object]".to_string()),
            Value::Object(map) => self.print_object(map, config, indentation, depth, refs),
            Value::Style(styles) => {
                self.print_object(&style_fields(styles), config, indentation, depth, refs)
            }
        }
    }

    fn print_object(
        &self,
        map: &BTreeMap<String, Value>,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
    ) -> SnapshotResult<String> {
        self.print_list(
            "Object {",
            "}",
            map.iter().map(|(k, v)| (Some(quote(k)), v)),
            config,
            indentation,
            depth,
            refs,
        )
    }
}

impl Printer for PrettyPrinter {
    fn print(
        &self,
        value: &Value,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
    ) -> SnapshotResult<String> {
        if let Some(plugin) = self.plugins.iter().find(|p| p.test(value)) {
            return plugin.serialize(value, config, indentation, depth, refs, self);
        }
        self.print_basic(value, config, indentation, depth, refs)
    }
}

fn style_fields(styles: &SerializedStyles) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    if let Some(name) = &styles.name {
        fields.insert("name".to_string(), Value::from(name.as_str()));
    }
    if let Some(css) = &styles.styles {
        fields.insert("styles".to_string(), Value::from(css.as_str()));
    }
    fields
}

fn print_primitive(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Null => "null".to_string(),
        Primitive::Bool(b) => b.to_string(),
        Primitive::Number(n) => print_number(*n),
        Primitive::String(s) => quote(s),
    }
}

fn print_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn print_component(component: &ComponentRef) -> String {
    match component.display_name() {
        Some(name) => format!("[Function {}]", name),
        None => "[Function anonymous]".to_string(),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
