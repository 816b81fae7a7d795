//! Adapters for emitting masked values through `slog`.
//!
//! This module provides `slog::Value` implementations for [`Masked`] and
//! [`MaskedValue`]. The value's `Display` output is streamed through its
//! masker straight into the serializer, so the unmasked text is never
//! formatted into a string.
//!
//! It does not configure `slog` or choose policies.

use std::fmt;

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    display::{Masked, MaskedValue},
    masker::Masker,
};

/// Marker trait for types whose `slog` integration always emits masked output.
///
/// ```compile_fail
/// use textmask::slog::SlogMasked;
///
/// fn assert_slog_masked<T: SlogMasked>() {}
///
/// assert_slog_masked::<String>();
/// ```
pub trait SlogMasked: SlogValue {}

impl<T: SlogMasked + ?Sized> SlogMasked for &T {}

impl<M, T> SlogValue for Masked<'_, M, T>
where
    M: Masker,
    T: fmt::Display + ?Sized,
{
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_arguments(key, &format_args!("{self}"))
    }
}

impl<M, T> SlogMasked for Masked<'_, M, T>
where
    M: Masker,
    T: fmt::Display + ?Sized,
{
}

impl<T, M> SlogValue for MaskedValue<T, M>
where
    T: fmt::Display,
    M: Masker,
{
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_arguments(key, &format_args!("{self}"))
    }
}

impl<T, M> SlogMasked for MaskedValue<T, M>
where
    T: fmt::Display,
    M: Masker,
{
}
