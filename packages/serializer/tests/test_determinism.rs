/// Determinism tests - the same tree always snapshots the same way
///
/// These tests validate that:
/// - Fresh serializers over equal registries give byte-identical output
/// - Serializing never mutates the input tree
/// - Node identities allocated along the way never leak into the output

use anyhow::Result;
use std::rc::Rc;
use stylesnap_serializer::tree::Value;
use stylesnap_serializer::{
    print_snapshot, ClassNameReplacer, PrintConfig, SerializerOptions, StyleSerializer,
    StyleSheet,
};

const TREE: &str = r#"{
    "$$typeof": "test-json",
    "type": "CssPropInternal",
    "props": {
        "css": [
            { "name": "abc", "styles": "color:red;label:Card;" },
            { "name": "def", "styles": "padding:4px;" }
        ],
        "__STYLE_TYPE_PLEASE_DO_NOT_USE__": "article",
        "title": "Card"
    },
    "children": [
        { "$$typeof": "test-json", "type": "h2", "props": { "className": "css-ghi" }, "children": ["Heading"] },
        { "$$typeof": "test-json", "type": "p", "children": ["Body", null, false] }
    ]
}"#;

fn sheet() -> StyleSheet {
    let sheet = StyleSheet::new();
    sheet.insert("css", ".css-abc{color:red;}");
    sheet.insert("css", ".css-def{padding:4px;}");
    sheet.insert("css", ".css-ghi{font-size:2em;}");
    sheet.insert("css", "@media (max-width:600px){.css-ghi{font-size:1em;}}");
    sheet
}

fn render(tree: &Value, replace: bool) -> Result<String> {
    let mut options = SerializerOptions::default();
    if replace {
        options = options.with_class_name_replacer(ClassNameReplacer::indexed("emotion"));
    }
    let serializer = Rc::new(StyleSerializer::new(sheet(), options));
    Ok(print_snapshot(tree, serializer, &PrintConfig::default())?)
}

#[test]
fn test_repeated_serialization_is_identical() -> Result<()> {
    let tree = Value::from_json(TREE)?;

    let results = (0..10)
        .map(|_| render(&tree, false))
        .collect::<Result<Vec<_>>>()?;

    for result in &results[1..] {
        assert_eq!(&results[0], result);
    }
    Ok(())
}

#[test]
fn test_reparsed_tree_gives_same_output() -> Result<()> {
    let first = render(&Value::from_json(TREE)?, true)?;
    let second = render(&Value::from_json(TREE)?, true)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_input_tree_is_untouched() -> Result<()> {
    let tree = Value::from_json(TREE)?;
    let before = tree.to_json()?;

    render(&tree, true)?;

    assert_eq!(tree.to_json()?, before);
    Ok(())
}

#[test]
fn test_output_shape() -> Result<()> {
    let out = render(&Value::from_json(TREE)?, false)?;

    assert!(out.starts_with(".css-abc {\n  color: red;\n}"));
    assert!(out.contains("@media (max-width:600px) {\n  .css-ghi {\n    font-size: 1em;\n  }\n}"));
    assert!(out.contains("<article\n  className=\"css-abc css-def\"\n  title=\"Card\"\n>"));
    assert!(!out.contains("CssPropInternal"));
    assert!(!out.contains('#'));
    Ok(())
}
