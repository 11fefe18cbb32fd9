//! CSS text handling
//!
//! A small, forgiving parser for the rule text a styling runtime inserts
//! (usually minified, one rule per insertion) and the pretty formatter the
//! snapshot output embeds. It understands rules, declarations, nested
//! at-rules, comments, quoted strings and parenthesised values; anything it
//! cannot make sense of is dropped rather than reported.

/// One item of a stylesheet or block
#[derive(Debug, Clone, PartialEq)]
pub enum CssItem {
    Rule {
        selector: String,
        block: Vec<CssItem>,
    },
    AtRule {
        name: String,
        prelude: String,
        block: Option<Vec<CssItem>>,
    },
    Declaration {
        property: String,
        value: String,
    },
    Comment(String),
}

/// Pretty-prints raw CSS text with a given indentation unit
pub trait CssFormatter {
    fn format(&self, css: &str, indent: &str) -> String;
}

impl<F> CssFormatter for F
where
    F: Fn(&str, &str) -> String,
{
    fn format(&self, css: &str, indent: &str) -> String {
        self(css, indent)
    }
}

/// Default formatter: one declaration per line, selectors of a list on
/// separate lines, top-level rules separated by a blank line
#[derive(Debug, Default, Clone, Copy)]
pub struct PrettyCss;

impl CssFormatter for PrettyCss {
    fn format(&self, css: &str, indent: &str) -> String {
        print_items(&parse(css), indent, 0)
    }
}

/// Parse stylesheet text
pub fn parse(css: &str) -> Vec<CssItem> {
    let mut parser = Parser { src: css, pos: 0 };
    let mut items = Vec::new();
    while parser.pos < parser.src.len() {
        // Stray closing braces end a block early; keep going
        items.extend(parser.parse_block());
    }
    items
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn parse_block(&mut self) -> Vec<CssItem> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return items;
            }
            if rest.starts_with('}') {
                self.pos += 1;
                return items;
            }
            if rest.starts_with("/*") {
                items.push(CssItem::Comment(self.read_comment()));
                continue;
            }

            let (head, stop) = self.read_head();
            match stop {
                Some('{') => {
                    self.pos += 1;
                    let block = self.parse_block();
                    items.push(block_item(head, block));
                }
                Some(';') => {
                    self.pos += 1;
                    items.extend(statement_item(head));
                }
                _ => items.extend(statement_item(head)),
            }
        }
    }

    fn read_comment(&mut self) -> String {
        let rest = self.rest();
        let end = rest[2..].find("*/").map(|i| i + 4).unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    /// Read up to the next top-level `;`, `{` or `}` (not consumed)
    fn read_head(&mut self) -> (&'a str, Option<char>) {
        let rest = self.rest();
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut parens = 0usize;

        for (i, c) in rest.char_indices() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '"' | '\'' => quote = Some(c),
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                ';' | '{' | '}' if parens == 0 => {
                    self.pos += i;
                    return (rest[..i].trim(), Some(c));
                }
                _ => {}
            }
        }

        self.pos = self.src.len();
        (rest.trim(), None)
    }
}

fn block_item(head: &str, block: Vec<CssItem>) -> CssItem {
    match head.strip_prefix('@') {
        Some(at) => {
            let (name, prelude) = split_at_rule(at);
            CssItem::AtRule {
                name,
                prelude,
                block: Some(block),
            }
        }
        None => CssItem::Rule {
            selector: collapse_whitespace(head),
            block,
        },
    }
}

fn statement_item(head: &str) -> Option<CssItem> {
    if head.is_empty() {
        return None;
    }
    if let Some(at) = head.strip_prefix('@') {
        let (name, prelude) = split_at_rule(at);
        return Some(CssItem::AtRule {
            name,
            prelude,
            block: None,
        });
    }
    let (property, value) = head.split_once(':')?;
    let property = property.trim();
    if property.is_empty() {
        return None;
    }
    Some(CssItem::Declaration {
        property: property.to_string(),
        value: value.trim().to_string(),
    })
}

fn split_at_rule(at: &str) -> (String, String) {
    let end = at
        .find(|c: char| c.is_whitespace() || c == '(' || c == '"' || c == '\'')
        .unwrap_or(at.len());
    (at[..end].to_string(), collapse_whitespace(at[end..].trim()))
}

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a selector list on its top-level commas
pub fn split_selectors(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in selector.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(selector[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(selector[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Whether `selector` contains the class selector `.class_name`
pub fn selector_references_class(selector: &str, class_name: &str) -> bool {
    if class_name.is_empty() {
        return false;
    }
    let needle = format!(".{}", class_name);
    selector.match_indices(&needle).any(|(i, _)| {
        !selector[i + needle.len()..]
            .chars()
            .next()
            .is_some_and(is_ident_char)
    })
}

/// Whether any rule in `items`, at any nesting level, references one of the classes
pub fn items_reference_classes<S: AsRef<str>>(items: &[CssItem], class_names: &[S]) -> bool {
    items.iter().any(|item| match item {
        CssItem::Rule { selector, block } => {
            class_names
                .iter()
                .any(|c| selector_references_class(selector, c.as_ref()))
                || items_reference_classes(block, class_names)
        }
        CssItem::AtRule {
            block: Some(block), ..
        } => items_reference_classes(block, class_names),
        _ => false,
    })
}

/// Names referenced by `animation` / `animation-name` declarations
pub fn animation_names(items: &[CssItem]) -> Vec<String> {
    let mut names = Vec::new();
    for item in items {
        match item {
            CssItem::Declaration { property, value }
                if property == "animation" || property == "animation-name" =>
            {
                names.extend(
                    value
                        .split(|c: char| c.is_whitespace() || c == ',')
                        .filter(|t| !t.is_empty())
                        .map(str::to_string),
                );
            }
            CssItem::Rule { block, .. }
            | CssItem::AtRule {
                block: Some(block), ..
            } => names.extend(animation_names(block)),
            _ => {}
        }
    }
    names
}

/// Print parsed items at the given nesting level
pub fn print_items(items: &[CssItem], indent: &str, level: usize) -> String {
    let pad = indent.repeat(level);
    let mut out = String::new();
    let mut previous_was_declaration: Option<bool> = None;

    for item in items {
        let is_declaration = matches!(item, CssItem::Declaration { .. });
        if let Some(previous) = previous_was_declaration {
            out.push_str(if previous && is_declaration { "\n" } else { "\n\n" });
        }
        previous_was_declaration = Some(is_declaration);

        match item {
            CssItem::Declaration { property, value } => {
                out.push_str(&format!("{}{}: {};", pad, property, value));
            }
            CssItem::Comment(text) => {
                out.push_str(&pad);
                out.push_str(text);
            }
            CssItem::Rule { selector, block } => {
                let selectors = split_selectors(selector).join(&format!(",\n{}", pad));
                out.push_str(&pad);
                out.push_str(&selectors);
                push_block(&mut out, block, indent, level, &pad);
            }
            CssItem::AtRule {
                name,
                prelude,
                block,
            } => {
                out.push_str(&pad);
                out.push('@');
                out.push_str(name);
                if !prelude.is_empty() {
                    out.push(' ');
                    out.push_str(prelude);
                }
                match block {
                    Some(block) => push_block(&mut out, block, indent, level, &pad),
                    None => out.push(';'),
                }
            }
        }
    }

    out
}

fn push_block(out: &mut String, block: &[CssItem], indent: &str, level: usize, pad: &str) {
    if block.is_empty() {
        out.push_str(" {}");
        return;
    }
    out.push_str(" {\n");
    out.push_str(&print_items(block, indent, level + 1));
    out.push('\n');
    out.push_str(pad);
    out.push('}');
}
