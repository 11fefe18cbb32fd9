/// End-to-end scenarios for the serializer
/// Rendered and shallow markers, nested serialization, replacer and matcher
use crate::*;
use std::rc::Rc;
use stylesnap_tree::{
    get_nodes, ComponentRef, Node, SerializedStyles, Value, LABEL_PROP, REAL_TYPE_PROP,
    STYLE_MARKER_INTERNAL_TYPE, STYLE_PROP,
};

#[cfg(test)]
mod scenario_tests {
    use super::*;

    fn sheet() -> StyleSheet {
        let sheet = StyleSheet::new();
        sheet.insert("css", ".css-abc{color:red;}");
        sheet.insert("css", ".css-def{color:blue;}");
        sheet
    }

    fn snapshot_of(tree: &Value, sheet: StyleSheet, options: SerializerOptions) -> String {
        let serializer = Rc::new(StyleSerializer::new(sheet, options));
        print_snapshot(tree, serializer, &PrintConfig::default()).expect("Failed to print snapshot")
    }

    #[test]
    fn test_rendered_marker_prints_as_real_type() {
        let tree = Value::from(
            Node::element(STYLE_MARKER_INTERNAL_TYPE)
                .with_prop(STYLE_PROP, SerializedStyles::new("abc", "color:red;"))
                .with_prop(REAL_TYPE_PROP, "span")
                .with_prop(LABEL_PROP, "Title")
                .with_class_name("css-abc")
                .with_child("Hello"),
        );

        let out = snapshot_of(&tree, sheet(), SerializerOptions::default());
        assert_eq!(
            out,
            ".css-abc {\n  color: red;\n}\n\n<span\n  className=\"css-abc\"\n>\n  Hello\n</span>"
        );
    }

    #[test]
    fn test_rendered_marker_keeps_component_type() {
        let tree = Value::from(
            Node::element(STYLE_MARKER_INTERNAL_TYPE)
                .with_prop(REAL_TYPE_PROP, ComponentRef::named("Card"))
                .with_class_name("css-def"),
        );

        let out = snapshot_of(&tree, sheet(), SerializerOptions::default());
        assert_eq!(out, ".css-def {\n  color: blue;\n}\n\n<Card\n  className=\"css-def\"\n/>");
    }

    #[test]
    fn test_invalid_real_type_surfaces_from_print() {
        let tree = Value::from(
            Node::test_json(STYLE_MARKER_INTERNAL_TYPE)
                .with_prop(STYLE_PROP, "color:red;")
                .with_prop(REAL_TYPE_PROP, ComponentRef::anonymous()),
        );
        let serializer = Rc::new(StyleSerializer::new(sheet(), SerializerOptions::default()));

        let err = print_snapshot(&tree, serializer.clone(), &PrintConfig::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidElementType { .. }));
        assert!(serializer.test(&tree));
    }

    #[test]
    fn test_styles_of_whole_tree_print_once() {
        let tree = Value::from(
            Node::test_json("section")
                .with_class_name("css-abc")
                .with_child(Node::test_json("p").with_class_name("css-def"))
                .with_child(Node::test_json("p").with_class_name("css-def")),
        );

        let out = snapshot_of(&tree, sheet(), SerializerOptions::default());
        assert!(out.starts_with(".css-abc {\n  color: red;\n}\n\n.css-def {\n  color: blue;\n}\n\n<section"));
        assert_eq!(out.matches(".css-def {").count(), 1);
        assert_eq!(out.matches("className=\"css-def\"").count(), 2);
    }

    #[test]
    fn test_element_in_prop_is_serialized_on_its_own() {
        let icon = Node::test_json("svg").with_class_name("css-def");
        let icon_id = icon.id();
        let tree = Value::from(
            Node::test_json("button")
                .with_class_name("css-abc")
                .with_prop("icon", icon),
        );
        let serializer = Rc::new(StyleSerializer::new(sheet(), SerializerOptions::default()));

        let out = print_snapshot(&tree, serializer.clone(), &PrintConfig::default()).unwrap();
        assert!(out.starts_with(".css-abc {\n  color: red;\n}\n\n<button"));
        assert!(out.contains("icon={\n    .css-def {\n  color: blue;\n}\n\n<svg"));
        assert_eq!(out.matches(".css-abc {").count(), 1);
        assert_eq!(out.matches(".css-def {").count(), 1);
        assert!(!serializer.is_processing(icon_id));
    }

    #[test]
    fn test_shallow_tree_matches_rendered_tree() {
        let sheet = StyleSheet::new();
        sheet.insert("css", ".css-xyz1{color:red;}");
        let marker = SerializedStyles::new("xyz1", "color:red;");

        let shallow = Value::from(
            Node::test_json(STYLE_MARKER_INTERNAL_TYPE)
                .with_prop(STYLE_PROP, marker.clone())
                .with_prop(REAL_TYPE_PROP, "div")
                .with_child("Hi"),
        );
        let rendered = Value::from(
            Node::test_json(STYLE_MARKER_INTERNAL_TYPE)
                .with_prop(STYLE_PROP, marker)
                .with_prop(REAL_TYPE_PROP, "div")
                .with_child(Node::test_json("div").with_class_name("css-xyz1").with_child("Hi")),
        );

        let from_shallow = snapshot_of(&shallow, sheet.clone(), SerializerOptions::default());
        let from_rendered = snapshot_of(&rendered, sheet, SerializerOptions::default());
        assert_eq!(from_shallow, from_rendered);
    }

    #[test]
    fn test_unlabelled_wrapper_keeps_its_children() {
        let tree = Value::from(
            Node::test_json(STYLE_MARKER_INTERNAL_TYPE)
                .with_prop(STYLE_PROP, SerializedStyles::new("abc", "color:red;"))
                .with_prop(REAL_TYPE_PROP, "div")
                .with_child(Node::test_json("p").with_class_name("css-def"))
                .with_child("text"),
        );

        let out = snapshot_of(&tree, sheet(), SerializerOptions::default());
        assert!(out.ends_with(
            "<div\n  className=\"css-abc\"\n>\n  <p\n    className=\"css-def\"\n  />\n  text\n</div>"
        ));
    }

    #[test]
    fn test_replacer_applies_to_styles_and_tree() {
        let options = SerializerOptions::default()
            .with_class_name_replacer(ClassNameReplacer::indexed("emotion"));
        let tree = Value::from(
            Node::test_json("div")
                .with_class_name("css-abc")
                .with_child(Node::test_json("i").with_class_name("css-def")),
        );

        let out = snapshot_of(&tree, sheet(), options);
        assert!(!out.contains("css-abc"));
        assert!(!out.contains("css-def"));
        assert!(out.starts_with(".emotion-0 {\n  color: red;\n}\n\n.emotion-1 {\n  color: blue;\n}"));
        assert!(out.contains("className=\"emotion-1\""));
    }

    #[test]
    fn test_serializing_twice_is_stable() {
        let tree = Value::from(
            Node::test_json(STYLE_MARKER_INTERNAL_TYPE)
                .with_prop(STYLE_PROP, SerializedStyles::new("abc", "color:red;"))
                .with_prop(REAL_TYPE_PROP, "div")
                .with_child(Node::test_json("span").with_class_name("css-def")),
        );
        let before = tree.clone();
        let serializer = Rc::new(StyleSerializer::new(sheet(), SerializerOptions::default()));

        let first = print_snapshot(&tree, serializer.clone(), &PrintConfig::default()).unwrap();
        let second = print_snapshot(&tree, serializer, &PrintConfig::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_matcher_reads_resolved_tree() {
        let sheet = StyleSheet::new();
        sheet.insert("css", ".css-abc{color:red;}");
        sheet.insert("css", ".css-abc:hover{color:blue;}");
        let tree = Value::from(Node::test_json("a").with_class_name("css-abc"));

        let snapshot = sheet.snapshot();
        let nodes = get_nodes(&tree);
        assert!(has_style_rule(nodes[0], &snapshot, "color", "red", &StyleRuleOptions::default()));
        assert!(has_style_rule(
            nodes[0],
            &snapshot,
            "color",
            "blue",
            &StyleRuleOptions::target(":hover")
        ));
    }
}
