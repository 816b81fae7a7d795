//! Character-index helpers. Every public index in this crate counts Unicode
//! scalar values, so these translate them to byte offsets.

use crate::error::{MaskError, check_range};

/// Byte offset of the `n`th character, or the text length if it has fewer.
pub(crate) fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Splits after the first `n` characters.
pub(crate) fn split_at_char(text: &str, n: usize) -> (&str, &str) {
    text.split_at(byte_offset(text, n))
}

/// Returns the characters `start..end` of `text`, validating the range first.
pub(crate) fn slice_chars(text: &str, start: usize, end: usize) -> Result<&str, MaskError> {
    check_range(start, end, text.chars().count())?;
    let from = byte_offset(text, start);
    let to = from + byte_offset(&text[from..], end - start);
    Ok(&text[from..to])
}
