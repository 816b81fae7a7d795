//! Buffer-then-apply fallback writer.

use std::fmt;

use super::{MAX_RESERVED_BYTES, NULL_TEXT};
use crate::{chars, error::MaskError, masker::Masker};

/// Collects all input and evaluates the masker once, on close.
///
/// Useful when a masker has no incremental form, or when the caller prefers
/// one batch evaluation over per-character work. Output only reaches the
/// sink on [`CachingWriter::close`].
///
/// ```rust
/// use textmask::{CachingWriter, Masker, Policy};
///
/// let policy = Policy::custom(|text| text.chars().rev().collect());
/// let mut writer = CachingWriter::with_capacity(&policy, String::new(), 16);
/// writer.write_str("abc")?;
/// writer.write_str("def")?;
/// assert_eq!(writer.into_inner()?, "fedcba");
/// # Ok::<(), textmask::MaskError>(())
/// ```
pub struct CachingWriter<'a, M, W> {
    masker: &'a M,
    sink: W,
    /// `None` once closed.
    buffer: Option<String>,
}

impl<'a, M: Masker, W: fmt::Write> CachingWriter<'a, M, W> {
    /// Default number of bytes reserved for the buffer.
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(masker: &'a M, sink: W) -> Self {
        Self::with_capacity(masker, sink, Self::DEFAULT_CAPACITY)
    }

    /// Creates a writer whose buffer starts with `capacity` bytes reserved.
    ///
    /// At most 4 KiB are reserved up front; the buffer grows past that as
    /// input arrives.
    pub fn with_capacity(masker: &'a M, sink: W, capacity: usize) -> Self {
        Self {
            masker,
            sink,
            buffer: Some(String::with_capacity(capacity.min(MAX_RESERVED_BYTES))),
        }
    }

    pub fn write_str(&mut self, text: &str) -> Result<(), MaskError> {
        self.buffer_mut()?.push_str(text);
        Ok(())
    }

    pub fn write_char(&mut self, ch: char) -> Result<(), MaskError> {
        self.buffer_mut()?.push(ch);
        Ok(())
    }

    /// Buffers the characters `start..end` of `text`.
    pub fn write_range(&mut self, text: &str, start: usize, end: usize) -> Result<(), MaskError> {
        let buffer = self.buffer_mut()?;
        buffer.push_str(chars::slice_chars(text, start, end)?);
        Ok(())
    }

    /// Like [`CachingWriter::write_str`], but absent text is an error.
    pub fn write_opt(&mut self, text: Option<&str>) -> Result<(), MaskError> {
        let buffer = self.buffer_mut()?;
        buffer.push_str(text.ok_or(MaskError::MissingInput)?);
        Ok(())
    }

    /// Like [`CachingWriter::write_str`], but absent text is buffered as the
    /// literal characters [`NULL_TEXT`].
    pub fn append_opt(&mut self, text: Option<&str>) -> Result<(), MaskError> {
        self.write_str(text.unwrap_or(NULL_TEXT))
    }

    /// Evaluates the buffered text and writes the result to the sink.
    ///
    /// Closing an already closed writer does nothing.
    pub fn close(&mut self) -> Result<(), MaskError> {
        let Some(buffer) = self.buffer.take() else {
            return Ok(());
        };
        tracing::trace!(buffered = buffer.len(), "evaluating cached input");
        self.sink.write_str(&self.masker.evaluate(&buffer))?;
        Ok(())
    }

    /// Closes the writer if needed and returns the sink.
    pub fn into_inner(mut self) -> Result<W, MaskError> {
        self.close()?;
        Ok(self.sink)
    }

    pub fn is_closed(&self) -> bool {
        self.buffer.is_none()
    }

    /// Bytes reserved by the buffer, zero once closed.
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, String::capacity)
    }

    fn buffer_mut(&mut self) -> Result<&mut String, MaskError> {
        self.buffer.as_mut().ok_or(MaskError::StreamClosed)
    }
}

impl<M: Masker, W: fmt::Write> fmt::Write for CachingWriter<'_, M, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        CachingWriter::write_str(self, s).map_err(|_| fmt::Error)
    }
}

impl<M, W> fmt::Debug for CachingWriter<'_, M, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingWriter")
            .field("buffered", &self.buffer.as_ref().map(String::len))
            .finish_non_exhaustive()
    }
}
