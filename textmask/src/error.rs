//! Errors reported by configuration builders and evaluators.
//!
//! Configuration errors are raised when a [`MaskSpec`](crate::MaskSpec) or a
//! [`Chain`](crate::Chain) is built, never later. Usage errors are raised by
//! the call that caused them and leave the evaluator untouched. Sink failures
//! pass through as [`MaskError::Sink`].

use std::fmt;

use thiserror::Error;

/// Everything that can go wrong while configuring or running a masker.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    /// A fixed total length cannot hold the configured kept spans.
    #[error(
        "fixed total length {total} is shorter than keep_at_start ({keep_at_start}) + keep_at_end ({keep_at_end})"
    )]
    FixedTotalLengthTooShort {
        total: usize,
        keep_at_start: usize,
        keep_at_end: usize,
    },

    /// Chain thresholds must strictly increase, starting above zero.
    #[error("chain threshold {requested} must be greater than the previous threshold {previous}")]
    ThresholdNotIncreasing { previous: usize, requested: usize },

    /// A policy that needs to see the end of its input was bounded by a threshold.
    #[error(
        "policy depends on the end of its input and cannot be bounded at length {threshold}; only the last chain segment may look ahead"
    )]
    LookaheadInNonTerminalSegment { threshold: usize },

    /// A segment list does not describe a valid chain.
    #[error("malformed chain: {reason}")]
    MalformedChain { reason: &'static str },

    /// A `start..end` character range does not fit the supplied text.
    #[error("character range {start}..{end} is out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    /// The stream was already closed.
    #[error("stream closed")]
    StreamClosed,

    /// A required text argument was absent.
    #[error("missing input text")]
    MissingInput,

    /// The underlying sink refused a write.
    #[error("sink write failed")]
    Sink(#[from] fmt::Error),
}

impl MaskError {
    /// Returns `true` for errors raised while building a configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::FixedTotalLengthTooShort { .. }
                | Self::ThresholdNotIncreasing { .. }
                | Self::LookaheadInNonTerminalSegment { .. }
                | Self::MalformedChain { .. }
        )
    }
}

/// Checks `start..end` against a text of `len` characters.
pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<(), MaskError> {
    if start > end || end > len {
        return Err(MaskError::OutOfBounds { start, end, len });
    }
    Ok(())
}
