//! Position selection for portion policies.
//!
//! Given a fully known text length, [`Layout::resolve`] decides how many
//! leading and trailing characters stay visible and how many mask characters
//! go between them. Both the batch and the streaming evaluators read their
//! decisions from here.

use std::iter;

use super::spec::{MaskSpec, OutputSizing};

/// Resolved shape of a portion mask for a text of known length.
///
/// Output is `text[..start]`, then `masked` mask characters, then
/// `text[len - end..]`. Under fixed sizings the two kept spans may overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) masked: usize,
}

impl Layout {
    pub(crate) fn resolve(spec: &MaskSpec, len: usize) -> Self {
        match spec.output_sizing() {
            OutputSizing::Natural => {
                let (start, end) = clamped_spans(spec, len);
                // Kept spans touching or overlapping: nothing left to hide.
                if start + end >= len {
                    return Self {
                        start: len,
                        end: 0,
                        masked: 0,
                    };
                }
                Self {
                    start,
                    end,
                    masked: len - start - end,
                }
            }
            OutputSizing::FixedMaskLength(masked) => {
                let (start, end) = clamped_spans(spec, len);
                Self { start, end, masked }
            }
            OutputSizing::FixedTotalLength(total) => {
                let start = spec.keep_at_start().min(len);
                let end = spec.keep_at_end().min(len);
                Self {
                    start,
                    end,
                    masked: total.saturating_sub(start + end),
                }
            }
        }
    }

    pub(crate) fn output_len(&self) -> usize {
        self.start + self.masked + self.end
    }
}

/// Kept spans limited by the `at_least_masked_*` guarantees.
fn clamped_spans(spec: &MaskSpec, len: usize) -> (usize, usize) {
    let start = spec
        .keep_at_start()
        .min(len.saturating_sub(spec.at_least_masked_from_end()));
    let end = spec
        .keep_at_end()
        .min(len.saturating_sub(spec.at_least_masked_from_start()));
    (start, end)
}

/// Applies `spec` to a complete text.
pub(crate) fn apply(spec: &MaskSpec, chars: &[char]) -> String {
    let len = chars.len();
    let layout = Layout::resolve(spec, len);
    let mut out = String::with_capacity(layout.output_len());
    out.extend(&chars[..layout.start]);
    out.extend(iter::repeat_n(spec.mask_char(), layout.masked));
    out.extend(&chars[len - layout.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spec: &MaskSpec, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        apply(spec, &chars)
    }

    #[test]
    fn keeps_last_four_of_a_card_number() {
        let spec = MaskSpec::keep_last(4);
        assert_eq!(run(&spec, "1234567890123456"), "************3456");
    }

    #[test]
    fn minimum_masked_prefix_hides_short_inputs_entirely() {
        let spec = MaskSpec::builder()
            .keep_at_end(4)
            .at_least_from_start(12)
            .build()
            .unwrap();
        assert_eq!(run(&spec, "1234567890"), "**********");
        assert_eq!(run(&spec, "1234567890123456"), "************3456");
    }

    #[test]
    fn minimum_masked_suffix_limits_the_kept_prefix() {
        let spec = MaskSpec::builder()
            .keep_at_start(6)
            .at_least_from_end(4)
            .build()
            .unwrap();
        assert_eq!(run(&spec, "abcdefgh"), "abcd****");
        assert_eq!(run(&spec, "abcdefghijkl"), "abcdef******");
    }

    #[test]
    fn natural_sizing_collapses_when_spans_cover_the_text() {
        let spec = MaskSpec::keep_both(2, 2);
        assert_eq!(run(&spec, "abc"), "abc");
        assert_eq!(run(&spec, "abcd"), "abcd");
        assert_eq!(run(&spec, "abcdef"), "ab**ef");

        let spec = MaskSpec::keep_both(usize::MAX, usize::MAX);
        assert_eq!(run(&spec, "abcd"), "abcd");
    }

    #[test]
    fn fixed_total_length_pads_short_inputs_with_overlapping_spans() {
        let spec = MaskSpec::builder()
            .keep_at_start(2)
            .keep_at_end(2)
            .with_fixed_total_length(6)
            .build()
            .unwrap();
        assert_eq!(run(&spec, "foo"), "fo**oo");
        assert_eq!(run(&spec, "f"), "f****f");
        assert_eq!(run(&spec, ""), "******");
        assert_eq!(run(&spec, "a much longer secret"), "a **et");
    }

    #[test]
    fn fixed_total_length_ignores_minimum_masked_spans() {
        let spec = MaskSpec::builder()
            .keep_at_start(2)
            .at_least_from_end(10)
            .with_fixed_total_length(5)
            .build()
            .unwrap();
        assert_eq!(run(&spec, "abcdef"), "ab***");
    }

    #[test]
    fn fixed_mask_length_is_independent_of_input_length() {
        let spec = MaskSpec::builder()
            .keep_at_start(2)
            .keep_at_end(2)
            .with_fixed_mask_length(3)
            .build()
            .unwrap();
        assert_eq!(run(&spec, "abcdefghij"), "ab***ij");
        assert_eq!(run(&spec, "abc"), "ab***bc");
        assert_eq!(run(&spec, ""), "***");
    }

    #[test]
    fn zero_fixed_mask_length_concatenates_kept_spans() {
        let spec = MaskSpec::builder()
            .keep_at_start(2)
            .keep_at_end(2)
            .with_fixed_mask_length(0)
            .build()
            .unwrap();
        assert_eq!(run(&spec, "abc"), "abbc");
        assert_eq!(run(&spec, "abcdef"), "abef");
    }

    #[test]
    fn all_four_bounds_use_independent_clamps() {
        let spec = MaskSpec::builder()
            .keep_at_start(3)
            .keep_at_end(3)
            .at_least_from_start(2)
            .at_least_from_end(2)
            .build()
            .unwrap();
        // len 10: start = min(3, 8), end = min(3, 8); 6 < 10.
        assert_eq!(run(&spec, "0123456789"), "012****789");
        // len 5: start = end = 3; spans cover the text so it collapses.
        assert_eq!(run(&spec, "01234"), "01234");
    }

    #[test]
    fn counts_unicode_scalar_values() {
        let spec = MaskSpec::keep_last(2).with_mask_char('#');
        assert_eq!(run(&spec, "秘密数据"), "##数据");
    }

    #[test]
    fn layout_reports_output_length() {
        let spec = MaskSpec::builder()
            .keep_at_start(24)
            .with_fixed_total_length(27)
            .build()
            .unwrap();
        let layout = Layout::resolve(&spec, 29);
        assert_eq!(layout.output_len(), 27);
        assert_eq!(layout.start, 24);
        assert_eq!(layout.masked, 3);
    }
}
