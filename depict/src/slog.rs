//! Adapters for emitting depictions through `slog`.
//!
//! This module connects [`Depiction`] with `slog` by providing a
//! `slog::Value` implementation that serializes the depicted tree as
//! structured JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the depicted tree, never the
//!   original value.
//! - Giving derived types a `slog::Value` impl (generated by
//!   `#[derive(Depict)]` when the `slog` feature is on) that portrays with
//!   the default design.
//!
//! It does not configure `slog` or choose which paths to log; build a
//! [`Design`](crate::Design) and log `design.portray(&value)` for that.

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    depiction::Depiction,
    portrait::{portray, Depict},
};

impl SlogValue for Depiction {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Emits `value` as a nested depiction under `key`.
///
/// Used by the `slog::Value` impls that `#[derive(Depict)]` generates.
#[doc(hidden)]
pub fn serialize_portrayed<T>(
    value: &T,
    record: &Record<'_>,
    key: Key,
    serializer: &mut dyn Serializer,
) -> SlogResult
where
    T: Depict + ?Sized,
{
    SlogValue::serialize(&portray(value), record, key, serializer)
}
