//! Portray values, private fields included, as filtered generic trees.
//!
//! This crate separates:
//! - **Shape**: how a type maps onto the generic tree (`Depict`).
//! - **Selection**: which paths of the tree are kept (`Design`, `PathRules`).
//! - **Encoding**: how the finished tree leaves the process (`Depiction`).
//!
//! The derive macro generates the field walk next to your type, so it reads
//! fields the type never exposes. Call `portray(&value)` or
//! `Design::portray(&value)` to get a `Depiction`, then encode it as JSON,
//! `bincode` or any `core::fmt` format.
//!
//! Key rules:
//! - `#[derive(Depict)]` walks every field in declaration order.
//! - `#[depict(rename = "x")]` renames, `#[depict(skip)]` (or rename `"-"`)
//!   omits. `#[serde(rename)]`/`#[serde(skip)]` are honored as hints unless
//!   the design ignores them.
//! - `#[depict(display)]` and `#[depict(opaque)]` cover fields whose types
//!   do not implement `Depict`.
//! - Paths look like `a.b[1].d` and match exactly. Once anything is
//!   included, everything not included (directly or through an ancestor) is
//!   dropped.
//!
//! Only types that derive or implement `Depict` can be portrayed: there is no
//! runtime reflection, so coverage is "every opted-in type" plus the standard
//! library types implemented here.
//!
//! What this crate does not do:
//! - perform I/O or logging on its own
//! - detect cycles (the depth limit bounds them)
//! - compare or validate depictions

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else,
    clippy::return_self_not_must_use
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use depict_derive::Depict;

#[allow(unused_extern_crates)]
extern crate self as depict;

// Module declarations
mod depiction;
mod error;
mod node;
mod portrait;
mod rules;
#[cfg(feature = "slog")]
pub mod slog;
pub mod timestamp;

// Re-exports
pub use depiction::Depiction;
pub use error::EncodeError;
pub use node::{Complex, Extent, Node, Record, Scalar};
pub use portrait::{
    portray, Depict, Design, FieldName, Fields, Opt, Sketch, Walker, BORROWED_EXTENT,
    DEFAULT_MAX_DEPTH, ERROR_KEY, LOCKED_EXTENT, OMITTED, RECORD_EXTENT, SEQUENCE_EXTENT,
    STRING_KEY, VALUE_EXTENT,
};
pub use rules::PathRules;
pub use timestamp::{Location, PackedTime};
