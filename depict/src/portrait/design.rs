//! Depiction configuration and the `portray` entrypoint.

use std::sync::OnceLock;

use serde::Deserialize;

use super::{
    shape::Depict,
    walker::{Sketch, Walker},
};
use crate::{
    depiction::Depiction,
    node::{Extent, Node, Scalar},
    rules::PathRules,
    timestamp,
};

/// Default recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Key under which a root error description is appended.
pub const ERROR_KEY: &str = "(error)";
/// Key under which a root `Display` description is appended.
pub const STRING_KEY: &str = "(string)";

/// A single configuration step.
///
/// A [`Design`] is the default configuration with a list of `Opt`s applied
/// left to right. `Opt` deserializes from `{"include": ["a.b"]}`-style
/// values so a design can be loaded from tool configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opt {
    /// Sets the recursion limit.
    MaxDepth(usize),
    /// Appends the value's `Display` text as `(string)` on a record root.
    ShowString,
    /// Replaces the whole output with the error text when the value is an error.
    OnlyError,
    /// Does not append `(error)` to error roots.
    HideError,
    /// Ignores transport-name hints (`#[serde(rename)]`, `#[serde(skip)]`).
    IgnoreTagHints,
    /// Walks well-known types (timestamps) field by field instead of rendering them.
    IgnoreKnownTypes,
    /// Restricts output to these paths and their descendants.
    Include(Vec<String>),
    /// Removes these paths and their descendants.
    Exclude(Vec<String>),
}

/// Configuration for turning values into [`Depiction`]s.
///
/// A design is never modified by a traversal and can be shared freely
/// between threads.
///
/// ```rust
/// use depict::{Depict, Design};
///
/// #[derive(Depict)]
/// struct Account {
///     id: u32,
///     secret: String,
/// }
///
/// let design = Design::new().exclude(["secret"]);
/// let depiction = design.portray(&Account { id: 7, secret: "hunter2".into() });
/// assert_eq!(depiction.to_json().unwrap(), r#"{"id":7}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Design {
    max_depth: usize,
    show_string: bool,
    only_error: bool,
    hide_error: bool,
    ignore_tag_hints: bool,
    ignore_known_types: bool,
    rules: PathRules,
}

impl Default for Design {
    fn default() -> Self {
        // resolve the host zone before anything is walked
        let _ = timestamp::local_zone();
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            show_string: false,
            only_error: false,
            hide_error: false,
            ignore_tag_hints: false,
            ignore_known_types: false,
            rules: PathRules::new(),
        }
    }
}

impl Design {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a design by applying `opts` to the defaults in order.
    pub fn from_opts<I>(opts: I) -> Self
    where
        I: IntoIterator<Item = Opt>,
    {
        opts.into_iter().fold(Self::new(), Self::apply)
    }

    /// Applies a single configuration step.
    #[must_use]
    pub fn apply(mut self, opt: Opt) -> Self {
        match opt {
            Opt::MaxDepth(depth) => self.max_depth = depth,
            Opt::ShowString => self.show_string = true,
            Opt::OnlyError => self.only_error = true,
            Opt::HideError => self.hide_error = true,
            Opt::IgnoreTagHints => self.ignore_tag_hints = true,
            Opt::IgnoreKnownTypes => self.ignore_known_types = true,
            Opt::Include(paths) => paths.into_iter().for_each(|path| self.rules.include(path)),
            Opt::Exclude(paths) => paths.into_iter().for_each(|path| self.rules.exclude(path)),
        }
        self
    }

    #[must_use]
    pub fn with_max_depth(self, depth: usize) -> Self {
        self.apply(Opt::MaxDepth(depth))
    }

    #[must_use]
    pub fn show_string(self) -> Self {
        self.apply(Opt::ShowString)
    }

    #[must_use]
    pub fn only_error(self) -> Self {
        self.apply(Opt::OnlyError)
    }

    #[must_use]
    pub fn hide_error(self) -> Self {
        self.apply(Opt::HideError)
    }

    #[must_use]
    pub fn ignore_tag_hints(self) -> Self {
        self.apply(Opt::IgnoreTagHints)
    }

    #[must_use]
    pub fn ignore_known_types(self) -> Self {
        self.apply(Opt::IgnoreKnownTypes)
    }

    /// Restricts output to `paths` (see [`PathRules`] for path syntax).
    #[must_use]
    pub fn include<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.apply(Opt::Include(paths.into_iter().map(Into::into).collect()))
    }

    /// Removes `paths` from the output (see [`PathRules`] for path syntax).
    #[must_use]
    pub fn exclude<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.apply(Opt::Exclude(paths.into_iter().map(Into::into).collect()))
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn rules(&self) -> &PathRules {
        &self.rules
    }

    pub fn ignores_tag_hints(&self) -> bool {
        self.ignore_tag_hints
    }

    pub fn ignores_known_types(&self) -> bool {
        self.ignore_known_types
    }

    /// Portrays `value` into a [`Depiction`].
    ///
    /// A `Depiction` passed in is returned as-is rather than wrapped again.
    pub fn portray<T>(&self, value: &T) -> Depiction
    where
        T: Depict + ?Sized,
    {
        if let Some(done) = value.as_depiction() {
            return done.clone();
        }

        let Sketch { node, included } = value.depict(&Walker::root(self));
        let mut node = if included { node } else { Node::Nil };

        if let Some(text) = value.error_text() {
            if self.only_error {
                node = Node::Scalar(Scalar::Text(text));
            } else if !self.hide_error {
                if let Node::Record(record) = &mut node {
                    record.insert(ERROR_KEY, Node::Opaque(Extent::new(text)));
                }
            }
        }
        if self.show_string {
            if let (Node::Record(record), Some(text)) = (&mut node, value.string_text()) {
                record.insert(STRING_KEY, Node::Opaque(Extent::new(text)));
            }
        }

        Depiction::new(node)
    }
}

/// Portrays `value` with the default [`Design`].
pub fn portray<T>(value: &T) -> Depiction
where
    T: Depict + ?Sized,
{
    static DEFAULT: OnceLock<Design> = OnceLock::new();
    DEFAULT.get_or_init(Design::new).portray(value)
}
