//! Edits on printed snapshot text

use crate::css::is_ident_char;

/// Put the formatted styles in front of the printed tree
pub fn splice_styles(styles: &str, printed: &str) -> String {
    if styles.is_empty() {
        printed.to_string()
    } else {
        format!("{}\n\n{}", styles, printed)
    }
}

/// Replace every whole-token occurrence of `class_name` in `text`.
///
/// An occurrence counts when it is not glued to other class-name characters,
/// so `css-abc` does not match inside `css-abc-Box` or `.xcss-abc`.
pub fn replace_class_name(text: &str, class_name: &str, replacement: &str) -> String {
    if class_name.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, matched) in text.match_indices(class_name) {
        let end = start + matched.len();
        let glued_before = text[..start].chars().next_back().is_some_and(is_ident_char);
        let glued_after = text[end..].chars().next().is_some_and(is_ident_char);
        if glued_before || glued_after || start < last {
            continue;
        }
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}
