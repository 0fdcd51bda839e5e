//! XML tree to payload flattening

use crate::payload::{ATTR_PREFIX, Payload, TEXT_KEY, Value};
use roxmltree::Node;

/// Flatten an element into a [`Payload`]
///
/// Attributes are copied under `@`-prefixed keys. A node without child
/// elements stores its trimmed text under `$` when non-empty; otherwise
/// every child element is flattened recursively and added under its local
/// tag name, repeated tags becoming an ordered sequence.
pub fn flatten_element(node: Node<'_, '_>) -> Payload {
    let mut payload = Payload::new();

    for attr in node.attributes() {
        payload.insert(
            format!("{}{}", ATTR_PREFIX, attr.name()),
            Value::Text(attr.value().to_string()),
        );
    }

    let mut elements = node.children().filter(Node::is_element).peekable();
    if elements.peek().is_none() {
        let text: String = node
            .children()
            .filter(Node::is_text)
            .filter_map(|n| n.text())
            .collect();
        let text = text.trim();
        if !text.is_empty() {
            payload.insert(TEXT_KEY, Value::Text(text.to_string()));
        }
        return payload;
    }

    for child in elements {
        payload.append(child.tag_name().name(), Value::Map(flatten_element(child)));
    }

    payload
}
