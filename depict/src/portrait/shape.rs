//! The `Depict` trait and its implementations for standard library types.
//!
//! ## Shapes
//!
//! | Rust type | Shape |
//! |-----------|-------|
//! | `#[derive(Depict)]` structs | Record |
//! | `HashMap`, `BTreeMap` (`K: Display`) | Record keyed by `K::to_string()` |
//! | `Vec`, slices, arrays, `VecDeque`, sets, tuples | Sequence |
//! | integers, floats, `bool`, `char`, strings | Scalar |
//! | `Option::None`, `()`, `PhantomData` | Nil |
//! | references, `Box`, `Rc`, `Arc`, `Cow`, `Some`, cells, locks | the inner value |
//! | raw pointers, fn pointers, channel endpoints | Opaque `#<type name>` |
//!
//! Indirection never adds depth and never changes the path.
//!
//! ## Locks and cells
//!
//! Traversal never blocks. A `RefCell` that is mutably borrowed depicts as
//! `#borrowed`, a contended `Mutex`/`RwLock` as `#locked`. Poisoned locks
//! are read anyway.

use std::{
    borrow::Cow,
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt,
    marker::PhantomData,
    ptr::NonNull,
    rc::Rc,
    sync::{
        mpsc::{Receiver, Sender, SyncSender},
        Arc, Mutex, RwLock, TryLockError,
    },
    time::{Duration, SystemTime},
};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use super::walker::{FieldName, Sketch, Walker};
use crate::{
    depiction::Depiction,
    node::{Complex, Extent, Node, Scalar},
    timestamp::{Location, PackedTime, TIMESTAMP_FORMAT},
};

/// Placeholder for a `RefCell` that is currently mutably borrowed.
pub const BORROWED_EXTENT: &str = "#borrowed";
/// Placeholder for a lock that is currently held elsewhere.
pub const LOCKED_EXTENT: &str = "#locked";

/// A value that can be portrayed as a generic tree.
///
/// Derive it with `#[derive(Depict)]`. The generated code lives next to the
/// type, so it reads private fields without the type exposing accessors.
/// Only types that opt in (derive or implement `Depict`) can be portrayed;
/// fields of foreign types can be rendered with `#[depict(display)]` or
/// `#[depict(opaque)]`.
///
/// ```compile_fail
/// use depict::Depict;
///
/// struct Connection;
///
/// #[derive(Depict)]
/// struct Pool {
///     size: usize,
///     primary: Connection,
/// }
/// ```
///
/// Implementations decide the shape of the value and hand the rest to the
/// [`Walker`]: depth limits, path rules and output assembly are applied
/// there.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Depict`",
    label = "this type cannot be walked",
    note = "use `#[derive(Depict)]` on the type definition",
    note = "or use `#[depict(display)]` / `#[depict(opaque)]` on the field"
)]
pub trait Depict {
    /// Depicts `self` at the walker's position.
    fn depict(&self, walker: &Walker<'_>) -> Sketch;

    /// Error description appended as `(error)` when `self` is the root.
    fn error_text(&self) -> Option<String> {
        None
    }

    /// `Display` description appended as `(string)` when `self` is the root.
    fn string_text(&self) -> Option<String> {
        None
    }

    /// Returns `self` when it already is a finished depiction.
    #[doc(hidden)]
    fn as_depiction(&self) -> Option<&Depiction> {
        None
    }
}

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_depict_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Depict for $ty {
                fn depict(&self, walker: &Walker<'_>) -> Sketch {
                    walker.scalar(*self)
                }
            }
        )*
    };
}

impl_depict_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, Complex,
);

impl Depict for str {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.scalar(self)
    }
}

impl Depict for String {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.scalar(self.as_str())
    }
}

impl Depict for Duration {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.scalar(self.as_nanos())
    }
}

impl Depict for () {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.nil()
    }
}

impl<T: ?Sized> Depict for PhantomData<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.nil()
    }
}

// =============================================================================
// Indirection
// =============================================================================

macro_rules! impl_depict_deref {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: Depict + ?Sized> Depict for $ty {
                fn depict(&self, walker: &Walker<'_>) -> Sketch {
                    (**self).depict(walker)
                }

                fn error_text(&self) -> Option<String> {
                    (**self).error_text()
                }

                fn string_text(&self) -> Option<String> {
                    (**self).string_text()
                }

                fn as_depiction(&self) -> Option<&Depiction> {
                    (**self).as_depiction()
                }
            }
        )*
    };
}

impl_depict_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<B> Depict for Cow<'_, B>
where
    B: Depict + ToOwned + ?Sized,
{
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        (**self).depict(walker)
    }
}

impl<T: Depict> Depict for Option<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        match self {
            Some(value) => value.depict(walker),
            None => walker.nil(),
        }
    }

    fn error_text(&self) -> Option<String> {
        self.as_ref().and_then(Depict::error_text)
    }

    fn string_text(&self) -> Option<String> {
        self.as_ref().and_then(Depict::string_text)
    }
}

impl<T: Depict, E: Depict> Depict for Result<T, E> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.record(|fields| match self {
            Ok(value) => {
                fields.field(FieldName::new("Ok"), value);
            }
            Err(error) => {
                fields.field(FieldName::new("Err"), error);
            }
        })
    }
}

impl<T: Depict + Copy> Depict for Cell<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        self.get().depict(walker)
    }
}

impl<T: Depict + ?Sized> Depict for RefCell<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        match self.try_borrow() {
            Ok(value) => value.depict(walker),
            Err(_) => walker.opaque(BORROWED_EXTENT),
        }
    }
}

impl<T: Depict + ?Sized> Depict for Mutex<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        match self.try_lock() {
            Ok(guard) => guard.depict(walker),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().depict(walker),
            Err(TryLockError::WouldBlock) => walker.opaque(LOCKED_EXTENT),
        }
    }
}

impl<T: Depict + ?Sized> Depict for RwLock<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        match self.try_read() {
            Ok(guard) => guard.depict(walker),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().depict(walker),
            Err(TryLockError::WouldBlock) => walker.opaque(LOCKED_EXTENT),
        }
    }
}

// =============================================================================
// Collections
// =============================================================================

impl<T: Depict> Depict for [T] {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.sequence(self)
    }
}

impl<T: Depict, const N: usize> Depict for [T; N] {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.sequence(self)
    }
}

impl<T: Depict> Depict for Vec<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.sequence(self)
    }
}

impl<T: Depict> Depict for VecDeque<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.sequence(self)
    }
}

impl<T: Depict, S> Depict for HashSet<T, S> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.sequence(self)
    }
}

impl<T: Depict> Depict for BTreeSet<T> {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.sequence(self)
    }
}

impl<K, V, S> Depict for HashMap<K, V, S>
where
    K: fmt::Display,
    V: Depict,
{
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.map(self)
    }
}

impl<K, V> Depict for BTreeMap<K, V>
where
    K: fmt::Display,
    V: Depict,
{
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.map(self)
    }
}

macro_rules! impl_depict_tuple {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name: Depict),+> Depict for ($($name,)+) {
                #[allow(non_snake_case)]
                fn depict(&self, walker: &Walker<'_>) -> Sketch {
                    let ($($name,)+) = self;
                    let items: &[&dyn Depict] = &[$($name),+];
                    walker.sequence(items.iter().copied())
                }
            }
        )*
    };
}

impl_depict_tuple!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
);

// =============================================================================
// Handles
// =============================================================================

macro_rules! impl_depict_handle {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Depict for $ty {
                fn depict(&self, walker: &Walker<'_>) -> Sketch {
                    walker.handle::<Self>()
                }
            }
        )*
    };
}

impl_depict_handle!(
    [T: ?Sized] *const T,
    [T: ?Sized] *mut T,
    [T: ?Sized] NonNull<T>,
    [T] Sender<T>,
    [T] SyncSender<T>,
    [T] Receiver<T>,
    [R] fn() -> R,
    [R, A] fn(A) -> R,
    [R, A, B] fn(A, B) -> R,
    [R, A, B, C] fn(A, B, C) -> R,
    [R, A, B, C, D] fn(A, B, C, D) -> R,
);

// =============================================================================
// Errors
// =============================================================================

macro_rules! impl_depict_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Depict for $ty {
                fn depict(&self, walker: &Walker<'_>) -> Sketch {
                    walker.record(|_| {})
                }

                fn error_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_depict_error!(
    dyn std::error::Error + '_,
    dyn std::error::Error + Send + Sync + '_,
    std::io::Error,
);

// =============================================================================
// Timestamps
// =============================================================================

impl Depict for PackedTime {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        if walker.design().ignores_known_types() {
            return walker.record(|fields| {
                fields
                    .field(FieldName::new("wall"), &self.wall)
                    .field(FieldName::new("ext"), &self.ext)
                    .field(FieldName::new("loc"), &self.loc);
            });
        }
        walker.rendered(|| {
            let decoded = self.decode();
            decoded.format().map_or_else(
                || Node::Opaque(Extent::new(format!("#{decoded:?}"))),
                |text| Node::Scalar(Scalar::Text(text)),
            )
        })
    }
}

impl Depict for Location {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.record(|fields| {
            fields.field(FieldName::new("name"), &self.name);
        })
    }
}

impl<Tz> Depict for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        walker.rendered(|| Node::Scalar(Scalar::Text(self.format(TIMESTAMP_FORMAT).to_string())))
    }
}

impl Depict for NaiveDateTime {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        self.and_utc().depict(walker)
    }
}

impl Depict for SystemTime {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        DateTime::<Utc>::from(*self).depict(walker)
    }
}

// =============================================================================
// Generic trees
// =============================================================================

impl Depict for Node {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        match self {
            Node::Record(record) => walker.record(|fields| {
                for (key, node) in record.iter() {
                    fields.entry(key, node);
                }
            }),
            Node::Sequence(items) => walker.sequence(items),
            Node::Scalar(scalar) => walker.scalar(scalar.clone()),
            Node::Opaque(extent) => walker.opaque(extent.as_str()),
            Node::Nil => walker.nil(),
        }
    }
}

impl Depict for serde_json::Value {
    fn depict(&self, walker: &Walker<'_>) -> Sketch {
        use serde_json::Value;

        match self {
            Value::Null => walker.nil(),
            Value::Bool(value) => walker.scalar(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_u64() {
                    walker.scalar(value)
                } else if let Some(value) = number.as_i64() {
                    walker.scalar(value)
                } else {
                    walker.scalar(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(value) => walker.scalar(value.as_str()),
            Value::Array(items) => walker.sequence(items),
            Value::Object(map) => walker.map(map),
        }
    }
}
