//! Snapshot serializer
//!
//! Ties the pipeline together for one tree:
//!
//! 1. Snapshot the style registry and its keys.
//! 2. Resolve style markers over a transformed copy of the tree.
//! 3. Collect class names and format the rules they resolve to.
//! 4. Clean the copy.
//! 5. Print the copy while its nodes are marked as processed, so the printer
//!    calling back into [`StyleSerializer::test`] falls through to default
//!    formatting for them.
//! 6. Put the styles in front of the printed tree and apply the class-name
//!    replacer.

use crate::css::{CssFormatter, PrettyCss};
use crate::error::SnapshotResult;
use crate::extract::{clean, collect_class_names, format_styles};
use crate::guard::ProcessedNodes;
use crate::options::{PrintConfig, SerializerOptions};
use crate::printer::{Plugin, PrettyPrinter, Printer, Refs};
use crate::registry::{RegistrySnapshot, StyleRegistry};
use crate::replace::{replace_class_name, splice_styles};
use crate::resolver::create_marker_converter;
use std::collections::HashSet;
use std::rc::Rc;
use stylesnap_tree::{deep_transform, get_nodes, is_markup_element, is_renderable_element, Node, NodeId, Value};
use tracing::{debug, instrument};

pub struct StyleSerializer<R, F = PrettyCss> {
    registry: R,
    formatter: F,
    options: SerializerOptions,
    processed: ProcessedNodes,
}

impl<R: StyleRegistry> StyleSerializer<R> {
    pub fn new(registry: R, options: SerializerOptions) -> Self {
        Self {
            registry,
            formatter: PrettyCss,
            options,
            processed: ProcessedNodes::new(),
        }
    }
}

impl<R: StyleRegistry, F: CssFormatter> StyleSerializer<R, F> {
    /// Use a different CSS formatter
    pub fn with_formatter<G: CssFormatter>(self, formatter: G) -> StyleSerializer<R, G> {
        StyleSerializer {
            registry: self.registry,
            formatter,
            options: self.options,
            processed: self.processed,
        }
    }

    /// Whether `id` belongs to a tree currently being printed by this serializer
    pub fn is_processing(&self, id: NodeId) -> bool {
        self.processed.contains(id)
    }

    /// Whether this serializer handles `value`
    pub fn test(&self, value: &Value) -> bool {
        let Some(node) = value.as_node() else {
            return false;
        };
        if self.processed.contains(node.id()) {
            return false;
        }
        is_renderable_element(value) || (self.options.dom_elements && is_markup_element(value))
    }

    #[instrument(skip_all, fields(depth = depth))]
    pub fn serialize(
        &self,
        value: &Value,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
        printer: &dyn Printer,
    ) -> SnapshotResult<String> {
        let snapshot = self.registry.snapshot();
        let keys = snapshot.keys();
        debug!(keys = keys.len(), elements = snapshot.elements().len(), "Read style registry");

        let mut transformed = deep_transform(value, &mut create_marker_converter(&keys))?;

        let class_names = collect_class_names(&transformed);
        let styles = format_styles(&snapshot, &class_names, &self.formatter, &config.indent);
        debug!(class_names = class_names.len(), styles_len = styles.len(), "Resolved styles");

        clean(&mut transformed, &class_names);

        let ids: Vec<NodeId> = get_nodes(&transformed).into_iter().map(Node::id).collect();
        let printed = {
            let marked = self.processed.mark(ids);
            debug!(marked = marked.len(), "Delegating to printer");
            printer.print(&transformed, config, indentation, depth, refs)?
        };

        Ok(self.finish(&snapshot, &class_names, &styles, &printed))
    }

    fn finish(
        &self,
        snapshot: &RegistrySnapshot,
        class_names: &[String],
        styles: &str,
        printed: &str,
    ) -> String {
        let mut output = splice_styles(styles, printed);
        let Some(replacer) = &self.options.class_name_replacer else {
            return output;
        };

        let styled: HashSet<&str> = snapshot.styled_class_names(class_names).into_iter().collect();
        for (index, class_name) in class_names.iter().enumerate() {
            if styled.contains(class_name.as_str()) {
                output = replace_class_name(&output, class_name, &replacer.replace(class_name, index));
            }
        }
        output
    }
}

impl<R, F> Plugin for StyleSerializer<R, F>
where
    R: StyleRegistry,
    F: CssFormatter,
{
    fn test(&self, value: &Value) -> bool {
        StyleSerializer::test(self, value)
    }

    fn serialize(
        &self,
        value: &Value,
        config: &PrintConfig,
        indentation: &str,
        depth: usize,
        refs: &Refs,
        printer: &dyn Printer,
    ) -> SnapshotResult<String> {
        StyleSerializer::serialize(self, value, config, indentation, depth, refs, printer)
    }
}

/// Print `value` with the reference printer and `serializer` as its plugin
pub fn print_snapshot<R, F>(
    value: &Value,
    serializer: Rc<StyleSerializer<R, F>>,
    config: &PrintConfig,
) -> SnapshotResult<String>
where
    R: StyleRegistry + 'static,
    F: CssFormatter + 'static,
{
    PrettyPrinter::new().with_plugin(serializer).print_root(value, config)
}

/// Like [`print_snapshot`], for a tree given as JSON
pub fn print_json_snapshot<R, F>(
    json: &str,
    serializer: Rc<StyleSerializer<R, F>>,
    config: &PrintConfig,
) -> SnapshotResult<String>
where
    R: StyleRegistry + 'static,
    F: CssFormatter + 'static,
{
    let value = Value::from_json(json)?;
    print_snapshot(&value, serializer, config)
}
