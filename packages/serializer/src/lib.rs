//! # Stylesnap Serializer
//!
//! Snapshot-printer plugin for trees styled with a CSS-in-JS runtime.
//!
//! Given a rendered (or shallow-rendered) tree, the serializer:
//!
//! - resolves style-marker elements so shallow and full renders print alike,
//! - looks up the rules behind every class name in the tree,
//! - prints those rules, formatted, in front of the tree,
//! - optionally rewrites generated class names into stable ones.
//!
//! ```ignore
//! let sheet = StyleSheet::new();
//! sheet.insert("css", ".css-abc{color:red;}");
//!
//! let serializer = Rc::new(StyleSerializer::new(sheet, SerializerOptions::default()));
//! let out = print_snapshot(&tree, serializer, &PrintConfig::default())?;
//! ```

pub mod css;
pub mod error;
pub mod extract;
pub mod guard;
pub mod matchers;
pub mod options;
pub mod printer;
pub mod registry;
pub mod replace;
pub mod resolver;
pub mod serializer;

#[cfg(test)]
mod tests_scenarios;

pub use css::{CssFormatter, CssItem, PrettyCss};
pub use error::{SnapshotError, SnapshotResult};
pub use extract::{clean, collect_class_names, format_styles};
pub use guard::{MarkedScope, ProcessedNodes};
pub use matchers::{has_style_rule, style_rule, StyleRuleOptions};
pub use options::{ClassNameReplacer, PrintConfig, SerializerOptions};
pub use printer::{Plugin, PrettyPrinter, Printer, Refs};
pub use registry::{RegistrySnapshot, StyleElement, StyleRegistry, StyleSheet};
pub use replace::{replace_class_name, splice_styles};
pub use resolver::{convert_style_markers, create_marker_converter, extract_labels};
pub use serializer::{print_json_snapshot, print_snapshot, StyleSerializer};

pub use stylesnap_tree as tree;
