//! Masking of sensitive text for logs and string representations.
//!
//! This crate separates:
//! - **Policies**: how a complete text is masked ([`Policy`], [`MaskSpec`],
//!   [`Chain`]).
//! - **Evaluation**: applying a policy in one call ([`Masker::evaluate`]) or
//!   incrementally as text is written ([`Masker::open_stream`]).
//!
//! Streaming output is identical to batch output for every way the input can
//! be split into writes. Policies whose output near the end depends on the
//! total length hold back only the characters that are still undecided.
//!
//! What this crate does:
//! - defines masking policies and validates their configuration
//! - evaluates them in batch and streaming form
//! - provides display wrappers and logging integrations (`tracing`, and
//!   `slog` behind a feature flag)
//!
//! What it does not do:
//! - discover or classify sensitive data
//! - make masked output irreversible against length or position correlation
//!
//! ```rust
//! use textmask::{Masker, Policy};
//!
//! let policy = Policy::keep_last(4);
//! assert_eq!(policy.evaluate("1234567890123456"), "************3456");
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::collapsible_if,
    clippy::return_self_not_must_use
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

mod chars;
mod display;
mod error;
mod masker;
pub mod policy;
#[cfg(feature = "slog")]
pub mod slog;
mod stream;
pub mod tracing;

pub use display::{Masked, MaskedExt, MaskedOutput, MaskedValue};
pub use error::MaskError;
pub use masker::Masker;
pub use policy::{
    Chain, ChainBuilder, CustomMask, MASK_CHAR, MaskSpec, MaskSpecBuilder, OutputSizing, Policy,
    Segment,
};
#[cfg(feature = "slog")]
pub use slog::SlogMasked;
pub use stream::{CachingWriter, MaskStream, NULL_TEXT};
