//! Masking policies and their batch evaluation.
//!
//! This module provides:
//!
//! - **Specs** (`spec`): [`MaskSpec`] and its builder, describing which spans of
//!   a text stay visible under a portion policy.
//!
//! - **Policies** (`policies`): the closed [`Policy`] enum.
//!
//! - **Chains** (`chain`): [`Chain`], several policies over consecutive
//!   length ranges of one text.
//!
//! # Example
//!
//! ```rust
//! use textmask::{MaskSpec, Masker, Policy};
//!
//! let spec = MaskSpec::builder()
//!     .keep_at_start(2)
//!     .keep_at_end(2)
//!     .with_fixed_total_length(6)
//!     .build()?;
//! assert_eq!(Policy::portion(spec).evaluate("foo"), "fo**oo");
//! # Ok::<(), textmask::MaskError>(())
//! ```

pub mod chain;
pub mod policies;
pub(crate) mod portion;
pub mod spec;

pub use chain::{Chain, ChainBuilder, Segment};
pub use policies::{CustomMask, Policy};
pub use spec::{MASK_CHAR, MaskSpec, MaskSpecBuilder, OutputSizing};
