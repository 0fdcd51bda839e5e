//! Normalized response payload
//!
//! Namecheap responses are flattened into an ordered mapping where
//! attributes live under `@Name`, a leaf's text lives under `$`, and child
//! elements live under their tag name. A tag that occurs once maps to a bare
//! [`Value::Map`]; a tag that repeats maps to a [`Value::List`] in document
//! order. The accessors here resolve that "one or many" shape at the point
//! of use so callers never branch on it themselves.

use indexmap::IndexMap;

/// Prefix marking attribute keys
pub const ATTR_PREFIX: &str = "@";

/// Key holding a node's own text content
pub const TEXT_KEY: &str = "$";

/// A single payload value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Attribute value or text content
    Text(String),
    /// Nested element
    Map(Payload),
    /// Repeated elements, in document order
    List(Vec<Value>),
}

impl Value {
    /// Borrow as text, if this is a text leaf
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow as a mapping, if this is a single element
    pub fn as_map(&self) -> Option<&Payload> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow as a sequence, if this is a repeated element
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Iterate the element mappings held by this value
    ///
    /// Yields one item for a single element and every mapping for a
    /// repeated one.
    pub fn maps(&self) -> impl Iterator<Item = &Payload> {
        self.items().iter().filter_map(Value::as_map)
    }

    /// Iterate the text of this value: a leaf's text, or the `$` of each
    /// element mapping
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items().iter().filter_map(|item| match item {
            Value::Text(text) => Some(text.as_str()),
            Value::Map(map) => map.text(),
            Value::List(_) => None,
        })
    }

    fn items(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

/// Ordered mapping produced from one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    entries: IndexMap<String, Value>,
}

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the payload has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a raw value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Remove a value, keeping the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Add a child value, promoting an existing entry to a sequence
    ///
    /// The first occurrence is stored bare; the second turns the entry into
    /// a [`Value::List`] holding both, and later ones are appended.
    pub fn append(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, value);
            }
            Some(Value::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, Value::List(Vec::with_capacity(2)));
                *existing = Value::List(vec![first, value]);
            }
        }
    }

    /// Attribute value, looked up under its `@` key
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&format!("{}{}", ATTR_PREFIX, name))
            .and_then(Value::as_text)
    }

    /// This node's own text content
    pub fn text(&self) -> Option<&str> {
        self.entries.get(TEXT_KEY).and_then(Value::as_text)
    }

    /// First child element with the given tag
    pub fn child(&self, name: &str) -> Option<&Payload> {
        self.children(name).next()
    }

    /// Every child element with the given tag, whether it occurred once or
    /// many times
    pub fn children(&self, name: &str) -> impl Iterator<Item = &Payload> {
        self.entries.get(name).into_iter().flat_map(Value::maps)
    }

    /// Text of the first child element with the given tag
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child_texts(name).next()
    }

    /// Text of every child element with the given tag
    pub fn child_texts(&self, name: &str) -> impl Iterator<Item = &str> {
        self.entries.get(name).into_iter().flat_map(Value::texts)
    }
}

impl FromIterator<(String, Value)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
