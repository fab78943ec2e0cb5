//! Traversal of values into generic trees.
//!
//! This module ties the pieces together:
//!
//! - **`shape`**: Shape layer - how a type maps onto the tree (`Depict`)
//! - **`walker`**: Traversal layer - paths, polarity and depth per node (`Walker`, `Fields`)
//! - **`design`**: Application layer - configuration and the `portray` entrypoint (`Design`)
//!
//! Path rules live in `crate::rules`, the output tree in `crate::node`.

mod design;
mod shape;
mod walker;

pub use design::{portray, Design, Opt, DEFAULT_MAX_DEPTH, ERROR_KEY, STRING_KEY};
pub use shape::{Depict, BORROWED_EXTENT, LOCKED_EXTENT};
pub use walker::{
    FieldName, Fields, Sketch, Walker, OMITTED, RECORD_EXTENT, SEQUENCE_EXTENT, VALUE_EXTENT,
};
