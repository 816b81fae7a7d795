//! The closed set of masking policies.
//!
//! A [`Policy`] is an immutable transformation of a complete text. Policies
//! compare by their canonical form: a portion spec that keeps nothing behaves
//! exactly like [`Policy::All`] (or [`Policy::FixedLength`] under a fixed
//! sizing) and is equal to it.
//!
//! # Example
//!
//! ```rust
//! use textmask::{Masker, Policy};
//!
//! let policy = Policy::keep_last(4);
//! assert_eq!(policy.evaluate("4111111111111111"), "************1111");
//!
//! let custom = Policy::keep_first(2).with_mask_char('#');
//! assert_eq!(custom.evaluate("secret"), "se####");
//! ```

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    iter,
    sync::Arc,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    portion,
    spec::{MASK_CHAR, MaskSpec, OutputSizing},
};

type MaskFn = dyn Fn(&str) -> String + Send + Sync;

/// A caller-supplied masking function.
///
/// Custom functions cannot be evaluated incrementally, so streams buffer the
/// whole input and call the function once on close. The buffer starts with
/// [`CustomMask::capacity_hint`] bytes reserved.
///
/// Equality is identity: two `CustomMask`s are equal only when they share the
/// same function allocation (clones of one another).
#[derive(Clone)]
pub struct CustomMask {
    func: Arc<MaskFn>,
    capacity_hint: usize,
}

impl CustomMask {
    /// Default number of bytes reserved for the stream buffer.
    pub const DEFAULT_CAPACITY_HINT: usize = 64;

    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            capacity_hint: Self::DEFAULT_CAPACITY_HINT,
        }
    }

    /// Reserves `capacity_hint` bytes up front when a stream buffers input.
    ///
    /// Streams reserve at most 4 KiB before the first write, whatever the
    /// hint; the buffer grows past that as input arrives.
    #[must_use]
    pub fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }

    pub fn apply(&self, text: &str) -> String {
        (self.func)(text)
    }

    fn identity(&self) -> *const () {
        Arc::as_ptr(&self.func).cast::<()>()
    }
}

impl fmt::Debug for CustomMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomMask")
            .field("func", &self.identity())
            .field("capacity_hint", &self.capacity_hint)
            .finish()
    }
}

impl PartialEq for CustomMask {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for CustomMask {}

impl Hash for CustomMask {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// A masking strategy for a complete text.
///
/// All strategies operate on Unicode scalar values.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Policy {
    /// Replace every character with the mask character.
    All(char),
    /// Leave the text unchanged.
    None,
    /// Replace the whole text with a constant.
    FixedValue(Cow<'static, str>),
    /// Replace the whole text with this many mask characters.
    FixedLength(usize, char),
    /// Keep leading/trailing spans and mask the rest.
    Portion(MaskSpec),
    /// Apply a caller-supplied function. Never serialized.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(CustomMask),
}

impl Policy {
    /// Masks every character with [`MASK_CHAR`].
    #[must_use]
    pub fn all() -> Self {
        Self::All(MASK_CHAR)
    }

    /// Replaces the whole text with `value`.
    #[must_use]
    pub fn fixed_value<V>(value: V) -> Self
    where
        V: Into<Cow<'static, str>>,
    {
        Self::FixedValue(value.into())
    }

    /// Replaces the whole text with `length` copies of [`MASK_CHAR`].
    #[must_use]
    pub fn fixed_length(length: usize) -> Self {
        Self::FixedLength(length, MASK_CHAR)
    }

    #[must_use]
    pub fn portion(spec: MaskSpec) -> Self {
        Self::Portion(spec)
    }

    /// Keeps only the first `visible_prefix` characters in clear text.
    #[must_use]
    pub fn keep_first(visible_prefix: usize) -> Self {
        Self::Portion(MaskSpec::keep_first(visible_prefix))
    }

    /// Keeps only the last `visible_suffix` characters in clear text.
    #[must_use]
    pub fn keep_last(visible_suffix: usize) -> Self {
        Self::Portion(MaskSpec::keep_last(visible_suffix))
    }

    /// Keeps both ends visible; collapses to the identity for short inputs.
    #[must_use]
    pub fn keep_both(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self::Portion(MaskSpec::keep_both(visible_prefix, visible_suffix))
    }

    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(CustomMask::new(func))
    }

    /// Overrides the masking character used by mask-emitting policies.
    ///
    /// Has no effect on [`Policy::None`], [`Policy::FixedValue`] and
    /// [`Policy::Custom`], which never emit mask characters of their own.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        match &mut self {
            Policy::All(current) | Policy::FixedLength(_, current) => *current = mask_char,
            Policy::Portion(spec) => *spec = spec.with_mask_char(mask_char),
            Policy::None | Policy::FixedValue(_) | Policy::Custom(_) => {}
        }
        self
    }

    /// Short name of the variant, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            Policy::All(_) => "all",
            Policy::None => "none",
            Policy::FixedValue(_) => "fixed_value",
            Policy::FixedLength(..) => "fixed_length",
            Policy::Portion(_) => "portion",
            Policy::Custom(_) => "custom",
        }
    }

    /// Returns `true` when output near the end of the text depends on where
    /// the text ends.
    pub fn is_end_anchored(&self) -> bool {
        matches!(self.canonical(), Canonical::Portion(spec) if spec.is_end_anchored())
    }

    /// Applies the policy to a complete text.
    pub(crate) fn apply_to(&self, text: &str) -> String {
        match self {
            Policy::All(mask_char) => text.chars().map(|_| *mask_char).collect(),
            Policy::None => text.to_owned(),
            Policy::FixedValue(value) => value.clone().into_owned(),
            Policy::FixedLength(length, mask_char) => iter::repeat_n(*mask_char, *length).collect(),
            Policy::Portion(spec) => {
                let chars: Vec<char> = text.chars().collect();
                portion::apply(spec, &chars)
            }
            Policy::Custom(mask) => mask.apply(text),
        }
    }

    fn canonical(&self) -> Canonical<'_> {
        match self {
            Policy::All(mask_char) => Canonical::All(*mask_char),
            Policy::None => Canonical::None,
            Policy::FixedValue(value) => Canonical::FixedValue(value),
            Policy::FixedLength(length, mask_char) => Canonical::FixedLength(*length, *mask_char),
            Policy::Portion(spec) if spec.keep_at_start() == 0 && spec.keep_at_end() == 0 => {
                match spec.output_sizing() {
                    OutputSizing::Natural => Canonical::All(spec.mask_char()),
                    OutputSizing::FixedMaskLength(length)
                    | OutputSizing::FixedTotalLength(length) => {
                        Canonical::FixedLength(length, spec.mask_char())
                    }
                }
            }
            Policy::Portion(spec) => Canonical::Portion(spec),
            Policy::Custom(mask) => Canonical::Custom(mask),
        }
    }
}

/// Behavioral identity of a policy, used for equality and hashing.
#[derive(PartialEq, Eq, Hash)]
enum Canonical<'a> {
    All(char),
    None,
    FixedValue(&'a str),
    FixedLength(usize, char),
    Portion(&'a MaskSpec),
    Custom(&'a CustomMask),
}

impl PartialEq for Policy {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Policy {}

impl Hash for Policy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::all()
    }
}

impl From<MaskSpec> for Policy {
    fn from(spec: MaskSpec) -> Self {
        Self::Portion(spec)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn all_masks_every_character() {
        assert_eq!(Policy::all().apply_to("secret"), "******");
        assert_eq!(Policy::all().apply_to(""), "");
        assert_eq!(Policy::All('x').apply_to("ñé"), "xx");
    }

    #[test]
    fn none_is_the_identity() {
        assert_eq!(Policy::None.apply_to("secret"), "secret");
    }

    #[test]
    fn fixed_policies_ignore_the_input() {
        assert_eq!(Policy::fixed_value("<hidden>").apply_to("abc"), "<hidden>");
        assert_eq!(Policy::fixed_value("<hidden>").apply_to(""), "<hidden>");
        assert_eq!(Policy::fixed_length(4).apply_to("a"), "****");
        assert_eq!(Policy::fixed_length(4).apply_to(""), "****");
    }

    #[test]
    fn keep_nothing_equals_all() {
        let spec = MaskSpec::builder()
            .keep_at_start(0)
            .keep_at_end(0)
            .build()
            .unwrap();
        assert_eq!(Policy::portion(spec), Policy::all());
        assert_ne!(Policy::portion(spec), Policy::All('#'));
    }

    #[test]
    fn keep_nothing_with_fixed_sizing_equals_fixed_length() {
        let spec = MaskSpec::builder()
            .with_fixed_total_length(8)
            .build()
            .unwrap();
        assert_eq!(Policy::portion(spec), Policy::fixed_length(8));
        assert_eq!(
            Policy::portion(spec).apply_to("abc"),
            Policy::fixed_length(8).apply_to("abc")
        );
    }

    #[test]
    fn equal_policies_hash_alike() {
        let mut set = HashSet::new();
        set.insert(Policy::keep_last(4));
        set.insert(Policy::keep_last(4));
        set.insert(Policy::portion(MaskSpec::keep_both(0, 0)));
        set.insert(Policy::all());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn custom_policies_compare_by_identity() {
        let a = Policy::custom(|text| text.to_uppercase());
        let b = Policy::custom(|text| text.to_uppercase());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.apply_to("abc"), "ABC");
    }

    #[test]
    fn with_mask_char_reaches_every_masking_variant() {
        assert_eq!(Policy::all().with_mask_char('#').apply_to("ab"), "##");
        assert_eq!(Policy::fixed_length(2).with_mask_char('#').apply_to(""), "##");
        assert_eq!(
            Policy::keep_last(1).with_mask_char('#').apply_to("abc"),
            "##c"
        );
        assert_eq!(Policy::None.with_mask_char('#').apply_to("abc"), "abc");
    }

    #[test]
    fn end_anchoring_uses_the_canonical_form() {
        assert!(Policy::keep_last(2).is_end_anchored());
        assert!(!Policy::keep_first(2).is_end_anchored());
        assert!(!Policy::all().is_end_anchored());

        let spec = MaskSpec::builder().at_least_from_end(3).build().unwrap();
        // Keeps nothing, so it is `All` whatever the minimum masked suffix.
        assert!(!Policy::portion(spec).is_end_anchored());
    }
}
