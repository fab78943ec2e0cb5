//! The finished output of a `portray` call.
//!
//! A [`Depiction`] wraps the generic tree and hands it to general-purpose
//! encoders. It contains no traversal logic: JSON goes through `serde_json`,
//! binary through `bincode`, and every `core::fmt` trait forwards the
//! caller's formatter to the tree, so `format!("{:>8.2}", depiction)` is the
//! same as `format!("{:>8.2}", depiction.tree())`.

use std::{fmt, io, sync::Arc};

use serde::{Serialize, Serializer};

use crate::{
    error::EncodeError,
    node::Node,
    portrait::{Depict, Sketch, Walker},
};

/// An immutable depiction of a value.
///
/// Cloning is cheap: clones share the same tree.
#[derive(Clone, PartialEq)]
pub struct Depiction {
    tree: Arc<Node>,
}

impl Depiction {
    pub(crate) fn new(tree: Node) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }

    /// The depicted tree.
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn into_tree(self) -> Node {
        Arc::try_unwrap(self.tree).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Returns true when both depictions share the same tree.
    pub fn ptr_eq(&self, other: &Depiction) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree)
    }

    /// Encodes the tree as compact JSON.
    pub fn to_json(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(&*self.tree)?)
    }

    /// Encodes the tree as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string_pretty(&*self.tree)?)
    }

    /// Writes the tree as compact JSON to `writer`.
    pub fn write_json<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        Ok(serde_json::to_writer(writer, &*self.tree)?)
    }

    /// Encodes the tree with `bincode`.
    pub fn to_binary(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(bincode::serialize(&*self.tree)?)
    }

    /// Writes the `bincode` encoding of the tree to `writer`.
    pub fn write_binary<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        Ok(bincode::serialize_into(writer, &*self.tree)?)
    }
}

impl From<Depiction> for Node {
    fn from(depiction: Depiction) -> Self {
        depiction.into_tree()
    }
}

impl Serialize for Depiction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tree.serialize(serializer)
    }
}

impl Depict for Depiction {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        self.tree.depict(walker)
    }

    fn as_depiction(&self) -> Option<&Depiction> {
        Some(self)
    }
}

macro_rules! forward_fmt {
    ($($verb:ident),* $(,)?) => {
        $(
            impl fmt::$verb for Depiction {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::$verb::fmt(&*self.tree, f)
                }
            }
        )*
    };
}

forward_fmt!(Display, Debug, LowerExp, UpperExp, LowerHex, UpperHex, Octal, Binary);
