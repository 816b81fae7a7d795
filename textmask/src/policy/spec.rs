//! Portion masking configuration.
//!
//! A [`MaskSpec`] describes which leading and trailing spans of a text stay
//! visible and how long the masked run is. It is validated once, when it is
//! built, and is immutable afterwards.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MaskError;

/// Default character used to mask sensitive characters.
pub const MASK_CHAR: char = '*';

/// How long the masked run of a portion policy is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutputSizing {
    /// One mask character per hidden input character.
    #[default]
    Natural,
    /// Exactly this many mask characters, whatever the input length.
    FixedMaskLength(usize),
    /// The whole output is exactly this many characters long.
    FixedTotalLength(usize),
}

/// Configuration of a portion policy.
///
/// Operates on Unicode scalar values. Two specs with the same fields are
/// interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MaskSpecBuilder"))]
pub struct MaskSpec {
    keep_at_start: usize,
    keep_at_end: usize,
    at_least_masked_from_start: usize,
    at_least_masked_from_end: usize,
    output_sizing: OutputSizing,
    mask_char: char,
}

impl MaskSpec {
    /// Starts a builder with nothing kept and natural sizing.
    #[must_use]
    pub fn builder() -> MaskSpecBuilder {
        MaskSpecBuilder::default()
    }

    /// Keeps the first `visible_prefix` characters visible.
    #[must_use]
    pub fn keep_first(visible_prefix: usize) -> Self {
        Self::keep_both(visible_prefix, 0)
    }

    /// Keeps the last `visible_suffix` characters visible.
    #[must_use]
    pub fn keep_last(visible_suffix: usize) -> Self {
        Self::keep_both(0, visible_suffix)
    }

    /// Keeps both leading and trailing characters visible.
    ///
    /// If `visible_prefix + visible_suffix >= total_length`, the entire value
    /// is kept visible (no masking occurs).
    #[must_use]
    pub fn keep_both(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            keep_at_start: visible_prefix,
            keep_at_end: visible_suffix,
            at_least_masked_from_start: 0,
            at_least_masked_from_end: 0,
            output_sizing: OutputSizing::Natural,
            mask_char: MASK_CHAR,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub fn keep_at_start(&self) -> usize {
        self.keep_at_start
    }

    pub fn keep_at_end(&self) -> usize {
        self.keep_at_end
    }

    pub fn at_least_masked_from_start(&self) -> usize {
        self.at_least_masked_from_start
    }

    pub fn at_least_masked_from_end(&self) -> usize {
        self.at_least_masked_from_end
    }

    pub fn output_sizing(&self) -> OutputSizing {
        self.output_sizing
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    /// Number of trailing characters whose fate depends on where the text ends.
    ///
    /// A streaming evaluator has to hold back this many characters until the
    /// input is closed.
    pub fn lookahead(&self) -> usize {
        match self.output_sizing {
            OutputSizing::FixedTotalLength(_) => self.keep_at_end,
            OutputSizing::Natural | OutputSizing::FixedMaskLength(_) => {
                self.keep_at_end.max(self.at_least_masked_from_end)
            }
        }
    }

    /// Returns `true` when the output near the end cannot be decided before
    /// the end of input is known.
    pub fn is_end_anchored(&self) -> bool {
        self.lookahead() > 0
    }
}

/// Builder for [`MaskSpec`].
///
/// Setters never fail; [`MaskSpecBuilder::build`] validates the combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MaskSpecBuilder {
    keep_at_start: usize,
    keep_at_end: usize,
    at_least_masked_from_start: usize,
    at_least_masked_from_end: usize,
    output_sizing: OutputSizing,
    mask_char: char,
}

impl Default for MaskSpecBuilder {
    fn default() -> Self {
        Self {
            keep_at_start: 0,
            keep_at_end: 0,
            at_least_masked_from_start: 0,
            at_least_masked_from_end: 0,
            output_sizing: OutputSizing::Natural,
            mask_char: MASK_CHAR,
        }
    }
}

impl MaskSpecBuilder {
    /// Keeps up to `n` leading characters visible.
    #[must_use]
    pub fn keep_at_start(mut self, n: usize) -> Self {
        self.keep_at_start = n;
        self
    }

    /// Keeps up to `n` trailing characters visible.
    #[must_use]
    pub fn keep_at_end(mut self, n: usize) -> Self {
        self.keep_at_end = n;
        self
    }

    /// Never reveals a trailing span that reaches into the first `n` characters.
    #[must_use]
    pub fn at_least_from_start(mut self, n: usize) -> Self {
        self.at_least_masked_from_start = n;
        self
    }

    /// Never reveals a leading span that reaches into the last `n` characters.
    #[must_use]
    pub fn at_least_from_end(mut self, n: usize) -> Self {
        self.at_least_masked_from_end = n;
        self
    }

    /// Emits exactly `n` mask characters regardless of the input length.
    #[must_use]
    pub fn with_fixed_mask_length(mut self, n: usize) -> Self {
        self.output_sizing = OutputSizing::FixedMaskLength(n);
        self
    }

    #[deprecated(since = "0.1.0", note = "Use with_fixed_mask_length instead")]
    #[must_use]
    pub fn with_fixed_length(self, n: usize) -> Self {
        self.with_fixed_mask_length(n)
    }

    /// Pads or truncates the masked run so the whole output is `n` characters.
    #[must_use]
    pub fn with_fixed_total_length(mut self, n: usize) -> Self {
        self.output_sizing = OutputSizing::FixedTotalLength(n);
        self
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Validates the configuration and freezes it.
    pub fn build(self) -> Result<MaskSpec, MaskError> {
        if let OutputSizing::FixedTotalLength(total) = self.output_sizing {
            if self.keep_at_start.saturating_add(self.keep_at_end) > total {
                return Err(MaskError::FixedTotalLengthTooShort {
                    total,
                    keep_at_start: self.keep_at_start,
                    keep_at_end: self.keep_at_end,
                });
            }
        }
        Ok(MaskSpec {
            keep_at_start: self.keep_at_start,
            keep_at_end: self.keep_at_end,
            at_least_masked_from_start: self.at_least_masked_from_start,
            at_least_masked_from_end: self.at_least_masked_from_end,
            output_sizing: self.output_sizing,
            mask_char: self.mask_char,
        })
    }
}

impl TryFrom<MaskSpecBuilder> for MaskSpec {
    type Error = MaskError;

    fn try_from(builder: MaskSpecBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
