//! End-to-end tests for the public masking API.
//!
//! These tests exercise:
//! - the documented masking scenarios in batch and streaming form,
//! - boundary behavior of each policy variant, and
//! - equality of configurations that behave identically.

use std::collections::HashSet;

use textmask::{MaskError, MaskSpec, Masker, OutputSizing, Policy};

mod scenarios {
    use super::*;

    #[test]
    fn keeps_last_four_digits_of_a_card_number() {
        let policy = Policy::portion(MaskSpec::builder().keep_at_end(4).build().unwrap());
        assert_eq!(policy.evaluate("1234567890123456"), "************3456");
    }

    #[test]
    fn minimum_masked_prefix_hides_short_numbers() {
        let policy = Policy::portion(
            MaskSpec::builder()
                .keep_at_end(4)
                .at_least_from_start(12)
                .build()
                .unwrap(),
        );
        assert_eq!(policy.evaluate("1234567890"), "**********");
    }

    #[test]
    fn fixed_total_length_pads_with_overlapping_spans() {
        let policy = Policy::portion(
            MaskSpec::builder()
                .keep_at_start(2)
                .keep_at_end(2)
                .with_fixed_total_length(6)
                .build()
                .unwrap(),
        );
        assert_eq!(policy.evaluate("foo"), "fo**oo");
    }

    #[test]
    fn chained_policies_cover_consecutive_ranges() {
        let chain = Policy::None
            .until_length(4)
            .unwrap()
            .then(Policy::all())
            .until_length(12)
            .unwrap()
            .then(Policy::None);
        assert_eq!(chain.evaluate("0123456789ABCDE"), "0123********CDE");
    }

    #[test]
    fn streamed_query_string_matches_batch() {
        let policy = Policy::portion(
            MaskSpec::builder()
                .keep_at_start(24)
                .with_fixed_total_length(27)
                .build()
                .unwrap(),
        );
        let mut stream = policy.open_stream(String::new());
        stream.write_str("username=admin").unwrap();
        stream.write_str("&password=hello").unwrap();
        let streamed = stream.into_inner().unwrap();

        assert_eq!(streamed, policy.evaluate("username=admin&password=hello"));
        assert_eq!(streamed, "username=admin&password=***");
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(Policy::all().evaluate(""), "");
        assert_eq!(Policy::None.evaluate(""), "");
        assert_eq!(Policy::fixed_length(3).evaluate(""), "***");
        assert_eq!(Policy::fixed_value("[hidden]").evaluate(""), "[hidden]");
        assert_eq!(Policy::keep_last(4).evaluate(""), "");
    }

    #[test]
    fn keeping_nothing_is_masking_everything() {
        let nothing_kept = Policy::portion(MaskSpec::keep_both(0, 0));
        assert_eq!(nothing_kept, Policy::all());
        assert_eq!(nothing_kept.evaluate("secret"), Policy::all().evaluate("secret"));

        let fixed = Policy::portion(MaskSpec::builder().with_fixed_mask_length(5).build().unwrap());
        assert_eq!(fixed, Policy::fixed_length(5));
        assert_eq!(fixed.evaluate("ab"), "*****");
    }

    #[test]
    fn natural_sizing_collapses_to_identity() {
        let policy = Policy::keep_both(3, 3);
        for text in ["", "a", "abc", "abcdef"] {
            assert_eq!(policy.evaluate(text), text);
        }
        assert_eq!(policy.evaluate("abcdefg"), "abc*efg");
    }

    #[test]
    fn fixed_total_length_is_exact_for_every_input_length() {
        let policy = Policy::portion(
            MaskSpec::builder()
                .keep_at_start(1)
                .keep_at_end(2)
                .with_fixed_total_length(8)
                .build()
                .unwrap(),
        );
        let mut text = String::new();
        for _ in 0..20 {
            assert_eq!(policy.evaluate(&text).chars().count(), 8, "input {text:?}");
            text.push('x');
        }
    }

    #[test]
    fn constant_policies_ignore_the_input() {
        let policy = Policy::fixed_value("[REDACTED]");
        assert_eq!(policy.evaluate("anything at all"), "[REDACTED]");
        assert_eq!(Policy::fixed_length(4).evaluate("a"), "****");
    }

    #[test]
    fn custom_mask_char_applies_to_every_mask_emitting_variant() {
        assert_eq!(Policy::all().with_mask_char('#').evaluate("abc"), "###");
        assert_eq!(Policy::fixed_length(2).with_mask_char('#').evaluate("abc"), "##");
        assert_eq!(Policy::keep_first(1).with_mask_char('•').evaluate("abc"), "a••");
        assert_eq!(Policy::None.with_mask_char('#').evaluate("abc"), "abc");
    }
}

mod configuration {
    use super::*;

    #[test]
    fn rejects_total_length_below_kept_spans() {
        let err = MaskSpec::builder()
            .keep_at_start(4)
            .keep_at_end(4)
            .with_fixed_total_length(7)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MaskError::FixedTotalLengthTooShort {
                total: 7,
                keep_at_start: 4,
                keep_at_end: 4
            }
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn equal_configurations_are_interchangeable() {
        let built = MaskSpec::builder().keep_at_end(4).build().unwrap();
        assert_eq!(built, MaskSpec::keep_last(4));
        assert_eq!(Policy::portion(built), Policy::keep_last(4));

        let mut seen = HashSet::new();
        seen.insert(Policy::keep_last(4));
        seen.insert(Policy::portion(built));
        seen.insert(Policy::all());
        seen.insert(Policy::portion(MaskSpec::keep_both(0, 0)));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn deprecated_fixed_length_setter_still_works() {
        #[allow(deprecated)]
        let spec = MaskSpec::builder()
            .keep_at_start(1)
            .with_fixed_length(3)
            .build()
            .unwrap();
        assert_eq!(spec.output_sizing(), OutputSizing::FixedMaskLength(3));
        assert_eq!(Policy::portion(spec).evaluate("abcdefgh"), "a***");
    }

    #[test]
    fn custom_policies_compare_by_identity() {
        let upper = Policy::custom(|text: &str| text.to_uppercase());
        let same_closure_again = Policy::custom(|text: &str| text.to_uppercase());
        assert_eq!(upper, upper.clone());
        assert_ne!(upper, same_closure_again);
        assert_eq!(upper.evaluate("abc"), "ABC");
    }
}
