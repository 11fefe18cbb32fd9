//! Style registry access
//!
//! The styling runtime owns a live set of style elements, each holding the
//! rule text it inserted. The serializer reads it once per call into a
//! [`RegistrySnapshot`] and works from that copy for the rest of the call.

use crate::css::{animation_names, items_reference_classes, parse, CssItem};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// One rule-defining element of the styling runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    /// Space-separated ownership attribute; its first token is the registry key
    pub key: String,
    /// Inserted rule text, in insertion order
    pub rules: Vec<String>,
}

impl StyleElement {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    pub fn registry_key(&self) -> Option<&str> {
        self.key.split_whitespace().next()
    }
}

/// Live source of style elements
pub trait StyleRegistry {
    fn style_elements(&self) -> Vec<StyleElement>;

    fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::new(self.style_elements())
    }
}

impl StyleRegistry for Vec<StyleElement> {
    fn style_elements(&self) -> Vec<StyleElement> {
        self.clone()
    }
}

impl<R: StyleRegistry + ?Sized> StyleRegistry for Rc<R> {
    fn style_elements(&self) -> Vec<StyleElement> {
        (**self).style_elements()
    }
}

/// In-memory registry; clones share the same elements
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    elements: Rc<RefCell<Vec<StyleElement>>>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` to the element owned by `key`, creating it on first use
    pub fn insert(&self, key: &str, rule: impl Into<String>) {
        let mut elements = self.elements.borrow_mut();
        match elements.iter_mut().find(|e| e.key == key) {
            Some(element) => element.rules.push(rule.into()),
            None => elements.push(StyleElement::new(key).with_rule(rule)),
        }
    }

    pub fn flush(&self) {
        self.elements.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}

impl StyleRegistry for StyleSheet {
    fn style_elements(&self) -> Vec<StyleElement> {
        self.elements.borrow().clone()
    }
}

/// Registry contents frozen for the duration of one serialize call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    elements: Vec<StyleElement>,
}

impl RegistrySnapshot {
    pub fn new(elements: Vec<StyleElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[StyleElement] {
        &self.elements
    }

    /// Registry keys in first-seen order
    pub fn keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.elements
            .iter()
            .filter_map(StyleElement::registry_key)
            .filter(|key| seen.insert(*key))
            .map(str::to_string)
            .collect()
    }

    /// Parsed rules, one entry per inserted rule text, in registry order
    pub fn parsed_rules(&self) -> Vec<(&str, Vec<CssItem>)> {
        self.elements
            .iter()
            .flat_map(|e| e.rules.iter())
            .map(|rule| (rule.as_str(), parse(rule)))
            .collect()
    }

    /// The subset of `class_names` some rule styles, in the given order.
    ///
    /// Parses the registry once for the whole list.
    pub fn styled_class_names<'c>(&self, class_names: &'c [String]) -> Vec<&'c str> {
        let rules = self.parsed_rules();
        class_names
            .iter()
            .map(String::as_str)
            .filter(|class_name| {
                rules
                    .iter()
                    .any(|(_, items)| items_reference_classes(items, &[*class_name]))
            })
            .collect()
    }

    /// Concatenated text of every rule styling one of `class_names`.
    ///
    /// Rules nested in conditional at-rules count, and `@keyframes` blocks
    /// referenced by an included rule's animation come along.
    pub fn styles_for<S: AsRef<str>>(&self, class_names: &[S]) -> String {
        if class_names.is_empty() {
            return String::new();
        }

        let rules = self.parsed_rules();
        let mut included: Vec<bool> = rules
            .iter()
            .map(|(_, items)| items_reference_classes(items, class_names))
            .collect();

        let animations: HashSet<String> = rules
            .iter()
            .zip(&included)
            .filter(|(_, keep)| **keep)
            .flat_map(|((_, items), _)| animation_names(items))
            .collect();

        if !animations.is_empty() {
            for ((_, items), keep) in rules.iter().zip(included.iter_mut()) {
                if !*keep && defines_keyframes(items, &animations) {
                    *keep = true;
                }
            }
        }

        rules
            .iter()
            .zip(&included)
            .filter(|(_, keep)| **keep)
            .map(|((text, _), _)| *text)
            .collect()
    }
}

fn defines_keyframes(items: &[CssItem], names: &HashSet<String>) -> bool {
    items.iter().any(|item| {
        matches!(
            item,
            CssItem::AtRule { name, prelude, block: Some(_) }
                if name.ends_with("keyframes") && names.contains(prelude.trim())
        )
    })
}
