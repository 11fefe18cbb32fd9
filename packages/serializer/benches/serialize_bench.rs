use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::rc::Rc;
use stylesnap_serializer::tree::{Node, SerializedStyles, Value, REAL_TYPE_PROP, STYLE_MARKER_INTERNAL_TYPE, STYLE_PROP};
use stylesnap_serializer::{
    print_snapshot, ClassNameReplacer, PrintConfig, SerializerOptions, StyleSerializer,
    StyleSheet,
};

fn sheet(rules: usize) -> StyleSheet {
    let sheet = StyleSheet::new();
    for i in 0..rules {
        sheet.insert("css", format!(".css-{}{{color:red;padding:{}px;}}", i, i));
        sheet.insert(
            "css",
            format!("@media (min-width:420px){{.css-{}{{padding:{}px;}}}}", i, i * 2),
        );
    }
    sheet
}

fn styled_list(items: usize) -> Value {
    let children = (0..items)
        .map(|i| {
            Value::from(
                Node::test_json("li")
                    .with_class_name(format!("css-{}", i))
                    .with_child(format!("Item {}", i)),
            )
        })
        .collect();
    Value::from(Node::test_json("ul").with_class_name("css-0").with_children(children))
}

fn shallow_markers(items: usize) -> Value {
    let children = (0..items)
        .map(|i| {
            Value::from(
                Node::test_json(STYLE_MARKER_INTERNAL_TYPE)
                    .with_prop(STYLE_PROP, SerializedStyles::new(i.to_string(), "color:red;"))
                    .with_prop(REAL_TYPE_PROP, "li")
                    .with_child(format!("Item {}", i)),
            )
        })
        .collect();
    Value::from(Node::test_json("ul").with_children(children))
}

fn serialize_styled_list(c: &mut Criterion) {
    let tree = styled_list(50);
    let serializer = Rc::new(StyleSerializer::new(sheet(50), SerializerOptions::default()));
    let config = PrintConfig::default();

    c.bench_function("serialize_styled_list", |b| {
        b.iter(|| print_snapshot(black_box(&tree), serializer.clone(), &config))
    });
}

fn serialize_shallow_markers(c: &mut Criterion) {
    let tree = shallow_markers(50);
    let serializer = Rc::new(StyleSerializer::new(sheet(50), SerializerOptions::default()));
    let config = PrintConfig::default();

    c.bench_function("serialize_shallow_markers", |b| {
        b.iter(|| print_snapshot(black_box(&tree), serializer.clone(), &config))
    });
}

fn serialize_with_replacer(c: &mut Criterion) {
    let tree = styled_list(50);
    let options =
        SerializerOptions::default().with_class_name_replacer(ClassNameReplacer::indexed("emotion"));
    let serializer = Rc::new(StyleSerializer::new(sheet(50), options));
    let config = PrintConfig::default();

    c.bench_function("serialize_with_replacer", |b| {
        b.iter(|| print_snapshot(black_box(&tree), serializer.clone(), &config))
    });
}

criterion_group!(
    benches,
    serialize_styled_list,
    serialize_shallow_markers,
    serialize_with_replacer
);
criterion_main!(benches);
