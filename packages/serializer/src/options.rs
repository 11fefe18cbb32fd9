use serde::{Deserialize, Serialize};
use std::fmt;

/// Rewrites a resolved class name in the printed snapshot.
///
/// Receives the class name and its position in the resolved class-name set.
pub struct ClassNameReplacer(Box<dyn Fn(&str, usize) -> String>);

impl ClassNameReplacer {
    pub fn new(replace: impl Fn(&str, usize) -> String + 'static) -> Self {
        Self(Box::new(replace))
    }

    /// Replace every class name with `<prefix>-<index>`
    pub fn indexed(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self::new(move |_, index| format!("{}-{}", prefix, index))
    }

    pub fn replace(&self, class_name: &str, index: usize) -> String {
        (self.0)(class_name, index)
    }
}

impl fmt::Debug for ClassNameReplacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClassNameReplacer(..)")
    }
}

/// Options for the snapshot serializer, fixed at construction time
#[derive(Debug)]
pub struct SerializerOptions {
    /// Substitutes resolved class names in the output
    pub class_name_replacer: Option<ClassNameReplacer>,
    /// Also accept raw markup trees, not just rendered elements
    pub dom_elements: bool,
}

impl SerializerOptions {
    pub fn with_class_name_replacer(mut self, replacer: ClassNameReplacer) -> Self {
        self.class_name_replacer = Some(replacer);
        self
    }

    pub fn with_dom_elements(mut self, dom_elements: bool) -> Self {
        self.dom_elements = dom_elements;
        self
    }
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            class_name_replacer: None,
            dom_elements: true,
        }
    }
}

/// Options for the pretty-printer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintConfig {
    /// Indentation unit, also used for formatted CSS
    pub indent: String,
    /// Nodes deeper than this are printed as `[type]`
    pub max_depth: Option<usize>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: None,
        }
    }
}
