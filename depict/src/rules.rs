//! Path-based inclusion and exclusion rules.
//!
//! Paths address nodes of the output tree: the root is `""`, a field `n`
//! under `p` is `p.n` (no leading dot at the root) and element `i` under `p`
//! is `p[i]`. Rules match exact paths only. There is no prefix or wildcard
//! matching, and a path string that the traversal can never produce (for
//! example one with unbalanced brackets) is stored as-is and never matches.

use std::collections::HashMap;

/// The configured rule set plus the global default polarity.
///
/// The default polarity starts out `true`. The first include directive that
/// registers a new path flips it to `false` for good: once anything has been
/// explicitly included, everything else is excluded unless an ancestor or
/// the node itself is included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathRules {
    default_inclusion: bool,
    paths: HashMap<String, bool>,
}

impl Default for PathRules {
    fn default() -> Self {
        Self {
            default_inclusion: true,
            paths: HashMap::new(),
        }
    }
}

impl PathRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an include directive for `path`.
    pub fn include(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.paths.contains_key(&path) {
            self.default_inclusion = false;
        }
        self.paths.insert(path, true);
    }

    /// Registers an exclude directive for `path`.
    pub fn exclude(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into(), false);
    }

    /// Polarity applied to the root before any rule is consulted.
    pub fn default_inclusion(&self) -> bool {
        self.default_inclusion
    }

    /// Returns the rule registered for exactly `path`, if any.
    pub fn rule(&self, path: &str) -> Option<bool> {
        self.paths.get(path).copied()
    }

    /// Effective polarity at `path`: its own rule, else the inherited one.
    pub fn resolve(&self, path: &str, inherited: bool) -> bool {
        self.rule(path).unwrap_or(inherited)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Path of the field `name` under `parent`.
pub(crate) fn field_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        return name.to_owned();
    }
    let mut path = String::with_capacity(parent.len() + name.len() + 1);
    path.push_str(parent);
    path.push('.');
    path.push_str(name);
    path
}

/// Path of the element at `index` under `parent`.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_everything() {
        let rules = PathRules::new();
        assert!(rules.default_inclusion());
        assert!(rules.is_empty());
        assert!(rules.resolve("a.b", true));
        assert!(!rules.resolve("a.b", false));
    }

    #[test]
    fn first_include_flips_default() {
        let mut rules = PathRules::new();
        rules.include("a.b");
        assert!(!rules.default_inclusion());
        assert_eq!(rules.rule("a.b"), Some(true));
    }

    #[test]
    fn repeated_include_is_a_no_op() {
        let mut rules = PathRules::new();
        rules.include("a");
        rules.include("a");
        assert_eq!(rules.len(), 1);
        assert!(!rules.default_inclusion());
    }

    #[test]
    fn exclude_never_touches_default() {
        let mut rules = PathRules::new();
        rules.exclude("a");
        rules.exclude("b");
        assert!(rules.default_inclusion());
        assert_eq!(rules.rule("a"), Some(false));
    }

    #[test]
    fn last_directive_wins_for_a_path() {
        let mut rules = PathRules::new();
        rules.include("a.b");
        rules.exclude("a.b");
        assert_eq!(rules.rule("a.b"), Some(false));

        rules.include("a.b");
        assert_eq!(rules.rule("a.b"), Some(true));
    }

    #[test]
    fn include_after_exclude_keeps_default() {
        let mut rules = PathRules::new();
        rules.exclude("a");
        rules.include("a");
        assert!(rules.default_inclusion());
        assert_eq!(rules.rule("a"), Some(true));
    }

    #[test]
    fn matching_is_exact() {
        let mut rules = PathRules::new();
        rules.exclude("a.b");
        assert!(rules.resolve("a.bc", true));
        assert!(rules.resolve("a", true));
        assert!(rules.resolve("a.b[0]", true));
        assert!(!rules.resolve("a.b", true));
    }

    #[test]
    fn malformed_paths_never_match() {
        let mut rules = PathRules::new();
        rules.exclude("a.b[1");
        assert!(rules.resolve(&index_path("a.b", 1), true));
    }

    #[test]
    fn paths_are_built_without_leading_dot() {
        assert_eq!(field_path("", "a"), "a");
        assert_eq!(field_path("a", "b"), "a.b");
        assert_eq!(index_path("a.b", 1), "a.b[1]");
        assert_eq!(field_path(&index_path("a.b", 1), "d"), "a.b[1].d");
        assert_eq!(index_path("", 0), "[0]");
    }
}
