//! Incremental masking through a write-style interface.
//!
//! This module provides:
//!
//! - [`MaskStream`]: writes masked output to a sink as text arrives, holding
//!   back only the characters whose fate depends on the end of input.
//! - [`CachingWriter`]: buffers everything and evaluates once on close.
//!
//! Both produce exactly what batch evaluation of the concatenated input
//! would produce.
//!
//! # Example
//!
//! ```rust
//! use textmask::{Masker, Policy};
//!
//! let policy = Policy::keep_last(4);
//! let mut stream = policy.open_stream(String::new());
//! stream.write_str("4111 1111 ")?;
//! stream.write_str("1111 1234")?;
//! let out = stream.into_inner()?;
//! assert_eq!(out, policy.evaluate("4111 1111 1111 1234"));
//! # Ok::<(), textmask::MaskError>(())
//! ```

mod caching;
mod strategy;

use std::fmt;

pub use caching::CachingWriter;
use strategy::Strategy;

use crate::{
    chars,
    error::MaskError,
    policy::{Chain, Policy, Segment},
};

/// Text written by the `append_opt` methods when no text is given.
pub const NULL_TEXT: &str = "null";

/// Upper bound on the bytes a buffer reserves before its first write.
pub(crate) const MAX_RESERVED_BYTES: usize = 4096;

/// Which policy receives the next character.
enum Route<'a> {
    Single,
    Chain {
        segments: &'a [Segment],
        index: usize,
    },
}

/// A streaming session that masks text on its way into `W`.
///
/// Created by [`Masker::open_stream`](crate::Masker::open_stream). Writes are
/// accepted until [`MaskStream::close`]; afterwards they fail with
/// [`MaskError::StreamClosed`]. Output already written to the sink is never
/// retracted.
///
/// Held-back characters (the end of a portion window, or everything a custom
/// policy has buffered) only reach the sink through [`MaskStream::close`] or
/// [`MaskStream::into_inner`]. Dropping an open stream discards them.
///
/// A sink error fails the call that hit it, but the character is still
/// counted as accepted, so later writes are routed as if it had succeeded.
///
/// A session is not meant to be shared between threads; it borrows its
/// policy, which can serve any number of sessions at once.
pub struct MaskStream<'a, W> {
    sink: W,
    route: Route<'a>,
    /// `None` once closed.
    strategy: Option<Strategy<'a>>,
    committed: usize,
}

impl<'a, W: fmt::Write> MaskStream<'a, W> {
    pub(crate) fn for_policy(policy: &'a Policy, sink: W) -> Self {
        tracing::trace!(policy = policy.kind(), "opening mask stream");
        Self {
            sink,
            route: Route::Single,
            strategy: Some(Strategy::new(policy)),
            committed: 0,
        }
    }

    pub(crate) fn for_chain(chain: &'a Chain, sink: W) -> Self {
        let segments = chain.segments();
        tracing::trace!(segments = segments.len(), "opening chained mask stream");
        Self {
            sink,
            route: Route::Chain { segments, index: 0 },
            strategy: segments
                .first()
                .map(|segment| Strategy::new(segment.policy())),
            committed: 0,
        }
    }

    /// Masks and writes `text`.
    pub fn write_str(&mut self, text: &str) -> Result<(), MaskError> {
        self.ensure_open()?;
        for ch in text.chars() {
            self.push(ch)?;
        }
        Ok(())
    }

    pub fn write_char(&mut self, ch: char) -> Result<(), MaskError> {
        self.ensure_open()?;
        self.push(ch)
    }

    /// Masks and writes the characters `start..end` of `text`.
    ///
    /// The range is checked before anything is written.
    pub fn write_range(&mut self, text: &str, start: usize, end: usize) -> Result<(), MaskError> {
        self.ensure_open()?;
        let slice = chars::slice_chars(text, start, end)?;
        self.write_str(slice)
    }

    /// Like [`MaskStream::write_str`], but absent text is an error.
    pub fn write_opt(&mut self, text: Option<&str>) -> Result<(), MaskError> {
        self.ensure_open()?;
        let text = text.ok_or(MaskError::MissingInput)?;
        self.write_str(text)
    }

    /// Like [`MaskStream::write_str`], but absent text is written as the
    /// literal characters [`NULL_TEXT`] and masked like any other input.
    pub fn append_opt(&mut self, text: Option<&str>) -> Result<(), MaskError> {
        self.write_str(text.unwrap_or(NULL_TEXT))
    }

    /// Flushes everything held back and closes the stream.
    ///
    /// Closing an already closed stream does nothing.
    pub fn close(&mut self) -> Result<(), MaskError> {
        let Some(mut strategy) = self.strategy.take() else {
            return Ok(());
        };
        tracing::trace!(committed = self.committed, "closing mask stream");
        strategy.finish(&mut self.sink)?;
        Ok(())
    }

    /// Closes the stream if needed and returns the sink.
    pub fn into_inner(mut self) -> Result<W, MaskError> {
        self.close()?;
        Ok(self.sink)
    }

    pub fn is_closed(&self) -> bool {
        self.strategy.is_none()
    }

    /// Number of characters accepted so far.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// The sink, holding whatever output is already certain.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    fn ensure_open(&self) -> Result<(), MaskError> {
        if self.is_closed() {
            return Err(MaskError::StreamClosed);
        }
        Ok(())
    }

    fn push(&mut self, ch: char) -> Result<(), MaskError> {
        self.advance_segment()?;
        let Some(strategy) = self.strategy.as_mut() else {
            return Err(MaskError::StreamClosed);
        };
        // The strategy owns the character even when the sink refuses it.
        let written = strategy.push(ch, &mut self.sink);
        self.committed += 1;
        written?;
        Ok(())
    }

    /// Moves to the next chain segment once the current one is full.
    fn advance_segment(&mut self) -> Result<(), MaskError> {
        let Route::Chain { segments, index } = &mut self.route else {
            return Ok(());
        };
        let segments: &'a [Segment] = *segments;
        let Some(current) = segments.get(*index) else {
            return Ok(());
        };
        if current.until() != Some(self.committed) {
            return Ok(());
        }
        let Some(next) = segments.get(*index + 1) else {
            return Ok(());
        };
        // The segment's own end stands in for the end of input.
        let flushed = match self.strategy.as_mut() {
            Some(strategy) => strategy.finish(&mut self.sink),
            None => Ok(()),
        };
        *index += 1;
        tracing::trace!(
            segment = *index,
            committed = self.committed,
            "chain segment boundary reached"
        );
        self.strategy = Some(Strategy::new(next.policy()));
        flushed?;
        Ok(())
    }
}

impl<W: fmt::Write> fmt::Write for MaskStream<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        MaskStream::write_str(self, s).map_err(|_| fmt::Error)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        MaskStream::write_char(self, c).map_err(|_| fmt::Error)
    }
}

impl<W> fmt::Debug for MaskStream<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskStream")
            .field("committed", &self.committed)
            .field("closed", &self.strategy.is_none())
            .finish_non_exhaustive()
    }
}
