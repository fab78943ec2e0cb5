//! The generic output tree.
//!
//! A [`Node`] is what every traversal step produces. Records keep insertion
//! order so that encoders emit fields in declaration order, followed by any
//! synthesized `(error)`/`(string)` entries.
//!
//! Formatting a node forwards the caller's [`fmt::Formatter`] (flags, width,
//! precision) to every leaf, so `format!("{:+.2}", node)` applies `+.2` to
//! each number in the tree.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, SerializeTuple, Serializer};

/// One unit of the generic output tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Ordered mapping of names to nodes.
    Record(Record),
    /// Ordered, dense list of nodes.
    Sequence(Vec<Node>),
    /// A primitive value copied out of the original.
    Scalar(Scalar),
    /// Placeholder text for a value that was not, or could not be, expanded.
    Opaque(Extent),
    /// An absent value.
    Nil,
}

impl Node {
    /// Returns the record if this node is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Node::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the elements if this node is a sequence.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the scalar if this node is one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the placeholder if this node is opaque.
    pub fn as_extent(&self) -> Option<&Extent> {
        match self {
            Node::Opaque(extent) => Some(extent),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Node::Nil)
    }

    /// Looks up a named child when this node is a record.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.as_record().and_then(|record| record.get(name))
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Node::Record(record)
    }
}

impl From<Extent> for Node {
    fn from(extent: Extent) -> Self {
        Node::Opaque(extent)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

// =============================================================================
// Record
// =============================================================================

/// Insertion-ordered mapping from names to nodes.
///
/// Inserting a name that is already present replaces the value in place, so
/// the entry keeps its original position. Equality compares entries in order.
#[derive(Clone, Debug, Default)]
pub struct Record {
    entries: IndexMap<String, Node>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts `node` under `name`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(name.into(), node)
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut record = Record::with_capacity(iter.size_hint().0);
        for (key, node) in iter {
            record.insert(key, node);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// Scalar
// =============================================================================

/// A primitive value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A complex number with `f64` parts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

macro_rules! impl_scalar_from {
    ($variant:ident <= $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_scalar_from!(Int <= i64: i8, i16, i32, i64);
impl_scalar_from!(Uint <= u64: u8, u16, u32, u64);
impl_scalar_from!(Float <= f64: f32, f64);
impl_scalar_from!(Bool <= bool: bool);
impl_scalar_from!(Complex <= Complex: Complex);
impl_scalar_from!(Text <= String: String, &str, char);

impl From<isize> for Scalar {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on every supported target
        i64::try_from(value).map_or_else(|_| Scalar::Text(value.to_string()), Scalar::Int)
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Scalar::Text(value.to_string()), Scalar::Uint)
    }
}

impl From<i128> for Scalar {
    fn from(value: i128) -> Self {
        i64::try_from(value).map_or_else(|_| Scalar::Text(value.to_string()), Scalar::Int)
    }
}

impl From<u128> for Scalar {
    fn from(value: u128) -> Self {
        u64::try_from(value).map_or_else(|_| Scalar::Text(value.to_string()), Scalar::Uint)
    }
}

// =============================================================================
// Extent
// =============================================================================

/// Placeholder text standing in for a value that was not expanded.
///
/// Extents serialize as plain strings but stay distinguishable from real
/// text in the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Extent(String);

impl Extent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Record(record) => record.serialize(serializer),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Opaque(extent) => extent.serialize(serializer),
            Node::Nil => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Bool(value) => serializer.serialize_bool(*value),
            Scalar::Int(value) => serializer.serialize_i64(*value),
            Scalar::Uint(value) => serializer.serialize_u64(*value),
            Scalar::Float(value) => serializer.serialize_f64(*value),
            Scalar::Complex(value) => value.serialize(serializer),
            Scalar::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl Serialize for Complex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.re)?;
        pair.serialize_element(&self.im)?;
        pair.end()
    }
}

impl Serialize for Extent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// =============================================================================
// Formatting
// =============================================================================

type LeafFormatter = fn(&Scalar, &mut fmt::Formatter<'_>) -> fmt::Result;

/// Writes the tree structure, delegating every scalar to `leaf`.
fn write_tree(node: &Node, f: &mut fmt::Formatter<'_>, leaf: LeafFormatter) -> fmt::Result {
    match node {
        Node::Record(record) => {
            f.write_str("{")?;
            for (index, (key, child)) in record.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(key)?;
                f.write_str(": ")?;
                write_tree(child, f, leaf)?;
            }
            f.write_str("}")
        }
        Node::Sequence(items) => {
            f.write_str("[")?;
            for (index, child) in items.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write_tree(child, f, leaf)?;
            }
            f.write_str("]")
        }
        Node::Scalar(scalar) => leaf(scalar, f),
        Node::Opaque(extent) => fmt::Display::fmt(extent, f),
        Node::Nil => f.write_str("null"),
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        fmt::Display::fmt(&self.re, f)?;
        if !self.im.is_sign_negative() && !f.sign_plus() {
            f.write_str("+")?;
        }
        fmt::Display::fmt(&self.im, f)?;
        f.write_str("i)")
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => fmt::Display::fmt(value, f),
            Scalar::Int(value) => fmt::Display::fmt(value, f),
            Scalar::Uint(value) => fmt::Display::fmt(value, f),
            Scalar::Float(value) => fmt::Display::fmt(value, f),
            Scalar::Complex(value) => fmt::Display::fmt(value, f),
            Scalar::Text(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(self, f, <Scalar as fmt::Display>::fmt)
    }
}

// Exponent verbs apply to every number; radix verbs only to integers. Other
// scalars fall back to `Display`.
macro_rules! impl_numeric_verb {
    ($verb:ident: $($variant:ident),*) => {
        impl fmt::$verb for Scalar {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Scalar::$variant(value) => fmt::$verb::fmt(value, f),)*
                    other => fmt::Display::fmt(other, f),
                }
            }
        }

        impl fmt::$verb for Node {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_tree(self, f, <Scalar as fmt::$verb>::fmt)
            }
        }
    };
}

impl_numeric_verb!(LowerExp: Int, Uint, Float);
impl_numeric_verb!(UpperExp: Int, Uint, Float);
impl_numeric_verb!(LowerHex: Int, Uint);
impl_numeric_verb!(UpperHex: Int, Uint);
impl_numeric_verb!(Octal: Int, Uint);
impl_numeric_verb!(Binary: Int, Uint);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_insertion_order() {
        let mut record = Record::new();
        record.insert("zeta", Node::Nil);
        record.insert("alpha", Node::Nil);
        record.insert("mid", Node::Nil);
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn record_insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("a", Scalar::from(1).into());
        record.insert("b", Scalar::from(2).into());
        let previous = record.insert("a", Scalar::from(3).into());

        assert_eq!(previous, Some(Node::Scalar(Scalar::Int(1))));
        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().next(), Some("a"));
        assert_eq!(record.get("a"), Some(&Node::Scalar(Scalar::Int(3))));
    }

    #[test]
    fn record_equality_is_order_sensitive() {
        let forward: Record = [("a", Node::Nil), ("b", Node::Nil)].into_iter().collect();
        let backward: Record = [("b", Node::Nil), ("a", Node::Nil)].into_iter().collect();
        assert_ne!(forward, backward);
        assert_eq!(forward, forward.clone());
    }

    #[test]
    fn wide_records_insert_and_look_up_by_name() {
        let record: Record = (0..10_000)
            .map(|n| (n.to_string(), Node::from(Scalar::from(n))))
            .collect();
        assert_eq!(record.len(), 10_000);
        assert_eq!(record.get("9999"), Some(&Node::Scalar(Scalar::Int(9999))));
        assert_eq!(record.keys().nth(1234), Some("1234"));
    }

    #[test]
    fn wide_integers_fall_back_to_text() {
        assert_eq!(Scalar::from(7_i128), Scalar::Int(7));
        assert_eq!(
            Scalar::from(u128::MAX),
            Scalar::Text(u128::MAX.to_string())
        );
        assert_eq!(Scalar::from('x'), Scalar::Text("x".to_string()));
    }

    #[test]
    fn display_forwards_precision_to_leaves() {
        let node = Node::Sequence(vec![Scalar::from(1.23456).into(), Node::Nil]);
        assert_eq!(format!("{node:.2}"), "[1.23, null]");
    }

    #[test]
    fn display_renders_records_in_order() {
        let record: Record = [
            ("b", Node::from(Scalar::from(true))),
            ("a", Node::from(Scalar::from("x"))),
        ]
        .into_iter()
        .collect();
        assert_eq!(Node::Record(record).to_string(), "{b: true, a: x}");
    }

    #[test]
    fn hex_applies_to_integers_only() {
        let node = Node::Sequence(vec![Scalar::from(255_u32).into(), Scalar::from("ff").into()]);
        assert_eq!(format!("{node:#x}"), "[0xff, ff]");
    }

    #[test]
    fn complex_displays_both_parts() {
        assert_eq!(Complex::new(1.0, -2.5).to_string(), "(1-2.5i)");
        assert_eq!(Complex::new(1.0, 2.0).to_string(), "(1+2i)");
    }
}
