//! Per-node traversal state.
//!
//! A [`Walker`] is handed to every [`Depict::depict`] call. It knows the
//! node's path, the polarity inherited from its ancestors (already adjusted
//! for an exact rule on this path) and its depth. `Depict` implementations
//! only decide the *shape* of their value; the walker applies depth limits,
//! consults the path rules for each child and assembles the output node.
//!
//! Children are depicted through [`Fields`] (records) or the collection
//! helpers on [`Walker`], each of which builds the child's path and walker.

use std::fmt;

use super::{design::Design, shape::Depict};
use crate::{
    node::{Extent, Node, Record, Scalar},
    rules::{field_path, index_path},
};

/// Placeholder for a truncated value of unknown or scalar shape.
pub const VALUE_EXTENT: &str = "...";
/// Placeholder for a truncated record or keyed collection.
pub const RECORD_EXTENT: &str = "{...}";
/// Placeholder for a truncated sequence.
pub const SEQUENCE_EXTENT: &str = "[...]";

/// Name an omitted field resolves to.
pub const OMITTED: &str = "-";

/// The outcome of depicting one value: its node and whether it is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct Sketch {
    pub node: Node,
    pub included: bool,
}

impl Sketch {
    pub fn new(node: Node, included: bool) -> Self {
        Self { node, included }
    }
}

#[derive(Clone, Copy, Debug)]
enum Shape {
    Value,
    Record,
    Sequence,
}

impl Shape {
    const fn extent(self) -> &'static str {
        match self {
            Shape::Value => VALUE_EXTENT,
            Shape::Record => RECORD_EXTENT,
            Shape::Sequence => SEQUENCE_EXTENT,
        }
    }
}

/// Traversal cursor for a single node.
#[derive(Debug)]
pub struct Walker<'a> {
    design: &'a Design,
    path: String,
    inclusion: bool,
    depth: usize,
}

impl<'a> Walker<'a> {
    pub(crate) fn root(design: &'a Design) -> Self {
        let rules = design.rules();
        Self {
            design,
            path: String::new(),
            inclusion: rules.resolve("", rules.default_inclusion()),
            depth: 1,
        }
    }

    pub fn design(&self) -> &'a Design {
        self.design
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Polarity in effect for this node.
    pub fn inclusion(&self) -> bool {
        self.inclusion
    }

    /// Depth of this node; the root is at depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn exhausted(&self) -> bool {
        self.depth > self.design.max_depth()
    }

    fn truncated(&self, shape: Shape) -> Sketch {
        Sketch::new(Node::Opaque(Extent::new(shape.extent())), self.inclusion)
    }

    fn leaf(&self, node: Node) -> Sketch {
        if self.exhausted() {
            return self.truncated(Shape::Value);
        }
        Sketch::new(node, self.inclusion)
    }

    fn descend(&self, path: String) -> Walker<'a> {
        let inclusion = self.design.rules().resolve(&path, self.inclusion);
        Walker {
            design: self.design,
            path,
            inclusion,
            depth: self.depth + 1,
        }
    }

    /// Depicts an absent value.
    pub fn nil(&self) -> Sketch {
        self.leaf(Node::Nil)
    }

    /// Depicts a primitive value.
    pub fn scalar(&self, value: impl Into<Scalar>) -> Sketch {
        self.leaf(Node::Scalar(value.into()))
    }

    /// Depicts a value that has no generic representation.
    ///
    /// `diagnostic` is emitted verbatim as the placeholder text.
    pub fn opaque(&self, diagnostic: impl Into<String>) -> Sketch {
        self.leaf(Node::Opaque(Extent::new(diagnostic)))
    }

    /// Depicts a handle (pointer, function, channel) as `#<type name>`.
    pub fn handle<T: ?Sized>(&self) -> Sketch {
        self.opaque(format!("#{}", std::any::type_name::<T>()))
    }

    /// Depicts a record-shaped value that renders as a single scalar.
    ///
    /// Used for well-known types such as timestamps: the depth limit applies
    /// as for a record, but `render` replaces field enumeration.
    pub fn rendered<F>(&self, render: F) -> Sketch
    where
        F: FnOnce() -> Node,
    {
        if self.exhausted() {
            return self.truncated(Shape::Record);
        }
        Sketch::new(render(), self.inclusion)
    }

    /// Depicts a record whose fields are visited by `visit`.
    pub fn record<F>(&self, visit: F) -> Sketch
    where
        F: FnOnce(&mut Fields<'_, 'a>),
    {
        if self.exhausted() {
            return self.truncated(Shape::Record);
        }
        let mut fields = Fields {
            walker: self,
            record: Record::new(),
            included: self.inclusion,
        };
        visit(&mut fields);
        Sketch::new(Node::Record(fields.record), fields.included)
    }

    /// Depicts a keyed collection; keys are converted to text.
    pub fn map<'v, K, V, I>(&self, entries: I) -> Sketch
    where
        K: fmt::Display,
        V: Depict + ?Sized + 'v,
        I: IntoIterator<Item = (K, &'v V)>,
    {
        self.record(|fields| {
            for (key, value) in entries {
                fields.entry(&key.to_string(), value);
            }
        })
    }

    /// Depicts a sequence. Excluded elements are dropped, so the output is
    /// dense and re-indexed.
    pub fn sequence<'v, V, I>(&self, items: I) -> Sketch
    where
        V: Depict + ?Sized + 'v,
        I: IntoIterator<Item = &'v V>,
    {
        if self.exhausted() {
            return self.truncated(Shape::Sequence);
        }
        let mut included = self.inclusion;
        let mut nodes = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let child = self.descend(index_path(&self.path, index));
            let sketch = item.depict(&child);
            if sketch.included {
                nodes.push(sketch.node);
                included = true;
            }
        }
        Sketch::new(Node::Sequence(nodes), included)
    }
}

/// How a record field is named in the output.
///
/// Resolution order: explicit rename, then the transport-name hint (unless
/// the design ignores hints), then the declared name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldName {
    declared: &'static str,
    rename: Option<&'static str>,
    hint: Option<&'static str>,
}

impl FieldName {
    pub const fn new(declared: &'static str) -> Self {
        Self {
            declared,
            rename: None,
            hint: None,
        }
    }

    #[must_use]
    pub const fn renamed(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    #[must_use]
    pub const fn hinted(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn resolve(&self, ignore_hints: bool) -> &'static str {
        match (self.rename, self.hint) {
            (Some(rename), _) => rename,
            (None, Some(hint)) if !ignore_hints => hint,
            _ => self.declared,
        }
    }
}

/// Collects the fields of a record being depicted.
pub struct Fields<'w, 'a> {
    walker: &'w Walker<'a>,
    record: Record,
    included: bool,
}

impl<'a> Fields<'_, 'a> {
    fn resolve(&self, name: FieldName) -> Option<&'static str> {
        let name = name.resolve(self.walker.design.ignores_tag_hints());
        (name != OMITTED).then_some(name)
    }

    fn install(&mut self, key: &str, sketch: Sketch) {
        if sketch.included {
            self.record.insert(key, sketch.node);
            self.included = true;
        }
    }

    fn child(&self, key: &str) -> Walker<'a> {
        self.walker.descend(field_path(&self.walker.path, key))
    }

    /// Visits a declared field.
    pub fn field<V>(&mut self, name: FieldName, value: &V) -> &mut Self
    where
        V: Depict + ?Sized,
    {
        if let Some(key) = self.resolve(name) {
            self.entry(key, value);
        }
        self
    }

    /// Visits a declared field through its `Display` rendering.
    pub fn display<V>(&mut self, name: FieldName, value: &V) -> &mut Self
    where
        V: fmt::Display + ?Sized,
    {
        if let Some(key) = self.resolve(name) {
            let sketch = self.child(key).scalar(value.to_string());
            self.install(key, sketch);
        }
        self
    }

    /// Visits a declared field whose type is not walked, emitting
    /// `#<type name>` in its place.
    pub fn opaque<V: ?Sized>(&mut self, name: FieldName, _value: &V) -> &mut Self {
        if let Some(key) = self.resolve(name) {
            let sketch = self.child(key).handle::<V>();
            self.install(key, sketch);
        }
        self
    }

    /// Visits a nested record, such as the fields of an enum variant.
    pub fn nested<F>(&mut self, name: FieldName, visit: F) -> &mut Self
    where
        F: FnOnce(&mut Fields<'_, 'a>),
    {
        if let Some(key) = self.resolve(name) {
            let sketch = self.child(key).record(visit);
            self.install(key, sketch);
        }
        self
    }

    /// Visits an entry under a literal key, bypassing name resolution.
    pub fn entry<V>(&mut self, key: &str, value: &V) -> &mut Self
    where
        V: Depict + ?Sized,
    {
        let sketch = value.depict(&self.child(key));
        self.install(key, sketch);
        self
    }
}
