//! Adapters for emitting masked values through `tracing`.
//!
//! # Example
//!
//! ```rust
//! use textmask::{MaskedValue, Policy, tracing::TracingMaskedExt};
//!
//! let token = MaskedValue::new("sk_live_abc123def456", Policy::keep_last(4));
//! tracing::info!(token = %token.tracing_masked(), "authenticated");
//! ```

use tracing::field::{DisplayValue, display};

use crate::display::MaskedOutput;

/// Extension trait for logging masked values as display fields.
///
/// The value is masked eagerly, so the field holds only masked text.
pub trait TracingMaskedExt {
    /// Wraps the masked text for `tracing` logging as a display value.
    fn tracing_masked(&self) -> DisplayValue<String>;
}

impl<T> TracingMaskedExt for T
where
    T: MaskedOutput,
{
    fn tracing_masked(&self) -> DisplayValue<String> {
        display(self.masked_output())
    }
}
