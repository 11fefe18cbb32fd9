//! Style-rule assertions
//!
//! Answers "what does this element's `color` resolve to?" from the registry,
//! optionally for a selector suffix (`:hover`, ` span`) or inside a given
//! `@media` block. The last matching declaration in registry order wins.

use crate::css::{collapse_whitespace, is_ident_char, split_selectors, CssItem};
use crate::registry::RegistrySnapshot;
use stylesnap_tree::Node;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRuleOptions {
    /// Selector suffix after the class, e.g. `:hover` or `> span`
    pub target: Option<String>,
    /// Prelude of the enclosing `@media` rule, e.g. `(min-width: 420px)`
    pub media: Option<String>,
}

impl StyleRuleOptions {
    pub fn target(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            media: None,
        }
    }

    pub fn media(media: impl Into<String>) -> Self {
        Self {
            target: None,
            media: Some(media.into()),
        }
    }
}

/// Media preludes compare without whitespace, so `(min-width:420px)` and
/// `(min-width: 420px)` are the same query
fn normalize_media(media: &str) -> String {
    media.chars().filter(|c| !c.is_whitespace()).collect()
}

fn selector_matches(selector: &str, class_names: &[&str], target: &str) -> bool {
    split_selectors(selector).into_iter().any(|part| {
        class_names.iter().any(|class_name| {
            part.strip_prefix('.')
                .and_then(|rest| rest.strip_prefix(class_name))
                .is_some_and(|rest| {
                    !rest.starts_with(is_ident_char)
                        && collapse_whitespace(rest) == target
                })
        })
    })
}

fn find_declaration(
    items: &[CssItem],
    class_names: &[&str],
    property: &str,
    options: &StyleRuleOptions,
    in_media: Option<&str>,
    found: &mut Option<String>,
) {
    let target = collapse_whitespace(options.target.as_deref().unwrap_or_default());
    let wanted_media = options.media.as_deref().map(normalize_media);

    for item in items {
        match item {
            CssItem::Rule { selector, block } => {
                let media_ok = match (&wanted_media, in_media) {
                    (None, None) => true,
                    (Some(wanted), Some(actual)) => *wanted == normalize_media(actual),
                    _ => false,
                };
                if !media_ok || !selector_matches(selector, class_names, &target) {
                    continue;
                }
                for declaration in block {
                    if let CssItem::Declaration { property: p, value } = declaration {
                        if p == property {
                            *found = Some(value.clone());
                        }
                    }
                }
            }
            CssItem::AtRule {
                name,
                prelude,
                block: Some(block),
            } if name == "media" => {
                find_declaration(block, class_names, property, options, Some(prelude), found);
            }
            CssItem::AtRule {
                name,
                block: Some(block),
                ..
            } if name == "supports" => {
                find_declaration(block, class_names, property, options, in_media, found);
            }
            _ => {}
        }
    }
}

/// Value `property` resolves to for `node`'s class names
pub fn style_rule(
    node: &Node,
    snapshot: &RegistrySnapshot,
    property: &str,
    options: &StyleRuleOptions,
) -> Option<String> {
    let class_names: Vec<&str> = node
        .class_name()
        .unwrap_or_default()
        .split(' ')
        .filter(|c| !c.is_empty())
        .collect();
    if class_names.is_empty() {
        return None;
    }

    let mut found = None;
    for (_, items) in snapshot.parsed_rules() {
        find_declaration(&items, &class_names, property, options, None, &mut found);
    }
    found
}

/// Whether `property` resolves to `expected` for `node`
pub fn has_style_rule(
    node: &Node,
    snapshot: &RegistrySnapshot,
    property: &str,
    expected: &str,
    options: &StyleRuleOptions,
) -> bool {
    style_rule(node, snapshot, property, options)
        .is_some_and(|value| collapse_whitespace(&value) == collapse_whitespace(expected))
}
