//! Masked string representations.
//!
//! This module provides:
//!
//! - [`Masked`]: borrows a value and a masker; formats the value's `Display`
//!   output through a [`MaskStream`](crate::MaskStream), so the unmasked
//!   string is never built.
//! - [`MaskedValue`]: owns a value together with its masker. `Debug` and
//!   `Display` show only the masked form; the original stays reachable
//!   through explicit accessors.
//! - [`MaskedOutput`]: the masked text of either, for logging adapters.

use std::fmt::{self, Write as _};

use crate::{masker::Masker, policy::Policy};

// =============================================================================
// Masked - Display wrapper
// =============================================================================

/// Display wrapper that masks `T`'s `Display` output.
pub struct Masked<'a, M, T: ?Sized> {
    masker: &'a M,
    value: &'a T,
}

impl<'a, M, T: ?Sized> Masked<'a, M, T> {
    pub fn new(masker: &'a M, value: &'a T) -> Self {
        Self { masker, value }
    }
}

impl<M: Masker, T: fmt::Display + ?Sized> fmt::Display for Masked<'_, M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stream = self.masker.open_stream(f);
        write!(stream, "{}", self.value)?;
        stream.close().map_err(|_| fmt::Error)
    }
}

impl<M: Masker, T: fmt::Display + ?Sized> fmt::Debug for Masked<'_, M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Extension trait to obtain a [`Masked`] wrapper for any `Display` value.
pub trait MaskedExt: fmt::Display {
    /// Wraps the value so it formats through `masker`.
    fn masked_with<'a, M: Masker>(&'a self, masker: &'a M) -> Masked<'a, M, Self> {
        Masked::new(masker, self)
    }
}

impl<T: fmt::Display + ?Sized> MaskedExt for T {}

// =============================================================================
// MaskedValue - Owning wrapper
// =============================================================================

/// A value that prints only in masked form.
///
/// ```rust
/// use textmask::{MaskedValue, Policy};
///
/// let card = MaskedValue::new("4111111111111111".to_string(), Policy::keep_last(4));
/// assert_eq!(card.to_string(), "************1111");
/// assert_eq!(card.expose(), "4111111111111111");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MaskedValue<T, M = Policy> {
    value: T,
    masker: M,
}

impl<T, M> MaskedValue<T, M> {
    pub fn new(value: T, masker: M) -> Self {
        Self { value, masker }
    }

    /// Explicitly access the inner value.
    ///
    /// This method makes it clear in your code that you are intentionally
    /// accessing the raw sensitive value. Use with care.
    pub fn expose(&self) -> &T {
        &self.value
    }

    /// Explicitly access the inner value mutably.
    pub fn expose_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consume the wrapper and return the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn masker(&self) -> &M {
        &self.masker
    }
}

impl<T: fmt::Display, M: Masker> fmt::Display for MaskedValue<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value.masked_with(&self.masker), f)
    }
}

impl<T: fmt::Display, M: Masker> fmt::Debug for MaskedValue<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MaskedValue")
            .field(&self.value.masked_with(&self.masker))
            .finish()
    }
}

// =============================================================================
// MaskedOutput - Masked text for logging boundaries
// =============================================================================

/// Produces the masked text of a wrapped value.
pub trait MaskedOutput {
    fn masked_output(&self) -> String;
}

impl<M: Masker, T: fmt::Display + ?Sized> MaskedOutput for Masked<'_, M, T> {
    fn masked_output(&self) -> String {
        self.to_string()
    }
}

impl<T: fmt::Display, M: Masker> MaskedOutput for MaskedValue<T, M> {
    fn masked_output(&self) -> String {
        self.to_string()
    }
}
