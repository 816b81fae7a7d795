//! The evaluation entry points shared by [`Policy`] and [`Chain`].

use std::fmt;

use crate::{
    chars,
    error::MaskError,
    policy::{Chain, Policy},
    stream::{CachingWriter, MaskStream},
};

/// Something that masks text, in one call or incrementally.
///
/// For every text and every way of splitting it into pieces, writing the
/// pieces to [`Masker::open_stream`] and closing the stream yields exactly
/// [`Masker::evaluate`] of the whole text.
pub trait Masker {
    /// Masks a complete text.
    fn evaluate(&self, text: &str) -> String;

    /// Masks the characters `start..end` of `text`.
    fn evaluate_range(&self, text: &str, start: usize, end: usize) -> Result<String, MaskError> {
        Ok(self.evaluate(chars::slice_chars(text, start, end)?))
    }

    /// Starts a streaming session writing masked output into `sink`.
    fn open_stream<W: fmt::Write>(&self, sink: W) -> MaskStream<'_, W>;

    /// Starts a buffering session that evaluates once on close.
    fn open_caching<W: fmt::Write>(&self, sink: W, capacity: usize) -> CachingWriter<'_, Self, W>
    where
        Self: Sized,
    {
        CachingWriter::with_capacity(self, sink, capacity)
    }
}

impl Masker for Policy {
    fn evaluate(&self, text: &str) -> String {
        self.apply_to(text)
    }

    fn open_stream<W: fmt::Write>(&self, sink: W) -> MaskStream<'_, W> {
        MaskStream::for_policy(self, sink)
    }
}

impl Masker for Chain {
    fn evaluate(&self, text: &str) -> String {
        self.apply_to(text)
    }

    fn open_stream<W: fmt::Write>(&self, sink: W) -> MaskStream<'_, W> {
        MaskStream::for_chain(self, sink)
    }
}
