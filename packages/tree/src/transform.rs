use crate::node::{NodeOverrides, Value};

/// Outcome of a per-node rewrite
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    /// The rewrite does not apply; the subtree is kept as is and not entered
    Unchanged,
    /// The node is replaced. A replacement `Array` becomes sibling content
    /// when it sits in a children list.
    Replaced(Value),
}

/// Rewrite a tree top-down with `transform`, producing a new tree.
///
/// Arrays map element-wise. When `transform` replaces a node that has
/// children, each child is transformed in turn and the resulting list is
/// flattened one level before it is attached to a new copy of the
/// replacement, so a child that unwraps into several siblings (or none)
/// lands directly in the parent's children.
pub fn deep_transform<E, F>(value: &Value, transform: &mut F) -> Result<Value, E>
where
    F: FnMut(&Value) -> Result<Transformed, E>,
{
    if let Value::Array(items) = value {
        return items
            .iter()
            .map(|item| deep_transform(item, transform))
            .collect::<Result<Vec<_>, E>>()
            .map(Value::Array);
    }

    match transform(value)? {
        Transformed::Unchanged => Ok(value.clone()),
        Transformed::Replaced(Value::Node(mut node)) => {
            let Some(children) = node.children.take() else {
                return Ok(Value::Node(node));
            };

            let mut flattened = Vec::with_capacity(children.len());
            for child in &children {
                match deep_transform(child, transform)? {
                    Value::Array(items) => flattened.extend(items),
                    other => flattened.push(other),
                }
            }

            Ok(Value::Node(node.override_with(NodeOverrides {
                children: Some(flattened),
                ..Default::default()
            })))
        }
        Transformed::Replaced(other) => Ok(other),
    }
}
