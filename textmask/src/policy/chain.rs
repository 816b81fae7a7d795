//! Policies applied to successive length ranges of one text.
//!
//! ```rust
//! use textmask::{Masker, Policy};
//!
//! let chain = Policy::None
//!     .until_length(4)?
//!     .then(Policy::all())
//!     .until_length(12)?
//!     .then(Policy::None);
//! assert_eq!(chain.evaluate("0123456789ABCDE"), "0123********CDE");
//! # Ok::<(), textmask::MaskError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::policies::Policy;
use crate::{chars, error::MaskError};

/// One length range of a [`Chain`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Cumulative length at which the next segment takes over; `None` for
    /// the last segment.
    until: Option<usize>,
    policy: Policy,
}

impl Segment {
    pub fn until(&self) -> Option<usize> {
        self.until
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

/// An ordered list of policies over consecutive character ranges.
///
/// The segment bounded by threshold `t` receives every character whose index
/// is below `t` and not claimed by an earlier segment. The last segment is
/// unbounded. Each segment is evaluated as if its characters were the whole
/// text.
///
/// Only the last segment may hold a policy that depends on the end of its
/// input; [`Chain::until_length`] rejects the others.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Segment>", into = "Vec<Segment>")
)]
pub struct Chain {
    segments: Vec<Segment>,
}

/// A chain whose last segment was just bounded and awaits its successor.
#[derive(Clone, Debug)]
#[must_use = "a chain builder does nothing until `then` supplies the next policy"]
pub struct ChainBuilder {
    segments: Vec<Segment>,
}

impl ChainBuilder {
    /// Appends `policy` as the new, unbounded last segment.
    pub fn then<P>(mut self, policy: P) -> Chain
    where
        P: Into<Policy>,
    {
        self.segments.push(Segment {
            until: None,
            policy: policy.into(),
        });
        Chain {
            segments: self.segments,
        }
    }
}

impl Chain {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Bounds the last segment to end once `threshold` characters have been
    /// committed in total.
    ///
    /// Fails if `threshold` does not exceed the previous threshold (or zero),
    /// or if the last segment's policy needs to see the end of its input.
    pub fn until_length(mut self, threshold: usize) -> Result<ChainBuilder, MaskError> {
        let previous = self.bounded_length();
        if threshold <= previous {
            return Err(MaskError::ThresholdNotIncreasing {
                previous,
                requested: threshold,
            });
        }
        let Some(last) = self.segments.last_mut() else {
            return Err(MaskError::MalformedChain {
                reason: "a chain needs at least one segment",
            });
        };
        if last.policy.is_end_anchored() {
            return Err(MaskError::LookaheadInNonTerminalSegment { threshold });
        }
        last.until = Some(threshold);
        Ok(ChainBuilder {
            segments: self.segments,
        })
    }

    /// Threshold of the last bounded segment, zero if there is none.
    fn bounded_length(&self) -> usize {
        self.segments
            .iter()
            .rev()
            .find_map(|segment| segment.until)
            .unwrap_or(0)
    }

    /// Applies each segment to its own range of a complete text.
    pub(crate) fn apply_to(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        let mut committed = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            // Segments past the end of input never start.
            if index > 0 && rest.is_empty() {
                break;
            }
            let (head, tail) = match segment.until {
                Some(until) => chars::split_at_char(rest, until - committed),
                None => (rest, ""),
            };
            out.push_str(&segment.policy.apply_to(head));
            committed = segment.until.unwrap_or(committed);
            rest = tail;
        }
        out
    }
}

impl Policy {
    /// Starts a [`Chain`] in which this policy covers the first `threshold`
    /// characters.
    pub fn until_length(self, threshold: usize) -> Result<ChainBuilder, MaskError> {
        Chain::from(self).until_length(threshold)
    }
}

impl From<Policy> for Chain {
    fn from(policy: Policy) -> Self {
        Self {
            segments: vec![Segment {
                until: None,
                policy,
            }],
        }
    }
}

impl TryFrom<Vec<Segment>> for Chain {
    type Error = MaskError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        let mut segments = segments.into_iter();
        let Some(first) = segments.next() else {
            return Err(MaskError::MalformedChain {
                reason: "a chain needs at least one segment",
            });
        };
        let mut chain = Chain::from(first.policy);
        let mut until = first.until;
        for segment in segments {
            let Some(threshold) = until else {
                return Err(MaskError::MalformedChain {
                    reason: "only the last segment may be unbounded",
                });
            };
            chain = chain.until_length(threshold)?.then(segment.policy);
            until = segment.until;
        }
        if until.is_some() {
            return Err(MaskError::MalformedChain {
                reason: "the last segment must be unbounded",
            });
        }
        Ok(chain)
    }
}

impl From<Chain> for Vec<Segment> {
    fn from(chain: Chain) -> Self {
        chain.segments
    }
}
