//! Incremental evaluation of a single policy.
//!
//! A [`Strategy`] receives characters one at a time and writes whatever
//! output is already certain. [`Strategy::finish`] is called once the input
//! (or the chain segment it serves) has ended and writes the rest.

use std::{collections::VecDeque, fmt, mem};

use super::MAX_RESERVED_BYTES;
use crate::policy::{CustomMask, MaskSpec, OutputSizing, Policy, portion::Layout};

/// Upper bound on the window capacity reserved up front.
const INITIAL_WINDOW: usize = 64;

pub(crate) enum Strategy<'a> {
    /// Every character is written unchanged.
    Passthrough,
    /// Every character becomes the mask character.
    MaskEach(char),
    /// Output is independent of input and written once.
    Constant { output: Constant<'a>, pending: bool },
    /// Portion policy, holding back the characters near the end.
    Window(PortionWindow),
    /// Custom function, applied to the whole input on finish.
    Buffered {
        mask: &'a CustomMask,
        buffer: String,
    },
}

pub(crate) enum Constant<'a> {
    Text(&'a str),
    Repeat(usize, char),
}

impl<'a> Strategy<'a> {
    pub(crate) fn new(policy: &'a Policy) -> Self {
        match policy {
            Policy::All(mask_char) => Self::MaskEach(*mask_char),
            Policy::None => Self::Passthrough,
            Policy::FixedValue(value) => Self::Constant {
                output: Constant::Text(value),
                pending: true,
            },
            Policy::FixedLength(length, mask_char) => Self::Constant {
                output: Constant::Repeat(*length, *mask_char),
                pending: true,
            },
            Policy::Portion(spec) => Self::Window(PortionWindow::new(*spec)),
            Policy::Custom(mask) => Self::Buffered {
                mask,
                buffer: String::with_capacity(mask.capacity_hint().min(MAX_RESERVED_BYTES)),
            },
        }
    }

    pub(crate) fn push<W: fmt::Write>(&mut self, ch: char, out: &mut W) -> fmt::Result {
        match self {
            Self::Passthrough => out.write_char(ch),
            Self::MaskEach(mask_char) => out.write_char(*mask_char),
            Self::Constant { output, pending } => {
                if mem::take(pending) {
                    output.write_to(out)?;
                }
                Ok(())
            }
            Self::Window(window) => window.push(ch, out),
            Self::Buffered { buffer, .. } => {
                buffer.push(ch);
                Ok(())
            }
        }
    }

    /// Writes everything still held back. The strategy is spent afterwards.
    pub(crate) fn finish<W: fmt::Write>(&mut self, out: &mut W) -> fmt::Result {
        match self {
            Self::Passthrough | Self::MaskEach(_) => Ok(()),
            Self::Constant { output, pending } => {
                if mem::take(pending) {
                    output.write_to(out)?;
                }
                Ok(())
            }
            Self::Window(window) => window.finish(out),
            Self::Buffered { mask, buffer } => {
                let text = mem::take(buffer);
                tracing::trace!(buffered = text.len(), "applying custom mask to buffered input");
                out.write_str(&mask.apply(&text))
            }
        }
    }
}

impl Constant<'_> {
    fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Constant::Text(text) => out.write_str(text),
            Constant::Repeat(length, mask_char) => write_repeated(out, *mask_char, *length),
        }
    }
}

pub(crate) fn write_repeated<W: fmt::Write>(out: &mut W, ch: char, count: usize) -> fmt::Result {
    for _ in 0..count {
        out.write_char(ch)?;
    }
    Ok(())
}

/// Streaming form of a portion policy.
///
/// The last [`MaskSpec::lookahead`] characters are kept in a window because
/// whether they are revealed depends on the final length. A character pushed
/// out of the window is at least `lookahead` positions from the end, and for
/// such a character the layout reduces to "kept iff its index is below
/// `keep_at_start`". Otherwise it is masked one-for-one (natural sizing) or
/// dropped because the fixed-length mask run is written on finish.
pub(crate) struct PortionWindow {
    spec: MaskSpec,
    lookahead: usize,
    window: VecDeque<char>,
    seen: usize,
}

impl PortionWindow {
    fn new(spec: MaskSpec) -> Self {
        let lookahead = spec.lookahead();
        Self {
            spec,
            lookahead,
            window: VecDeque::with_capacity(lookahead.min(INITIAL_WINDOW)),
            seen: 0,
        }
    }

    fn push<W: fmt::Write>(&mut self, ch: char, out: &mut W) -> fmt::Result {
        let index = self.seen;
        self.seen += 1;
        if self.lookahead == 0 {
            return self.settle(index, ch, out);
        }
        self.window.push_back(ch);
        if self.window.len() > self.lookahead {
            if let Some(oldest) = self.window.pop_front() {
                return self.settle(index - self.lookahead, oldest, out);
            }
        }
        Ok(())
    }

    /// Writes a character whose position is known to lie outside the end span.
    fn settle<W: fmt::Write>(&self, index: usize, ch: char, out: &mut W) -> fmt::Result {
        if index < self.spec.keep_at_start() {
            return out.write_char(ch);
        }
        match self.spec.output_sizing() {
            OutputSizing::Natural => out.write_char(self.spec.mask_char()),
            OutputSizing::FixedMaskLength(_) | OutputSizing::FixedTotalLength(_) => Ok(()),
        }
    }

    fn finish<W: fmt::Write>(&mut self, out: &mut W) -> fmt::Result {
        let len = self.seen;
        let layout = Layout::resolve(&self.spec, len);
        let first = len - self.window.len();
        tracing::trace!(
            held = self.window.len(),
            total = len,
            masked = layout.masked,
            "resolving portion window"
        );
        let window = mem::take(&mut self.window);
        match self.spec.output_sizing() {
            OutputSizing::Natural => {
                for (offset, ch) in window.into_iter().enumerate() {
                    let index = first + offset;
                    if index < layout.start || index >= len - layout.end {
                        out.write_char(ch)?;
                    } else {
                        out.write_char(self.spec.mask_char())?;
                    }
                }
                Ok(())
            }
            OutputSizing::FixedMaskLength(_) | OutputSizing::FixedTotalLength(_) => {
                let kept_start = layout.start.saturating_sub(first).min(window.len());
                for ch in window.iter().take(kept_start) {
                    out.write_char(*ch)?;
                }
                write_repeated(out, self.spec.mask_char(), layout.masked)?;
                let tail_from = window.len().saturating_sub(layout.end);
                for ch in window.iter().skip(tail_from) {
                    out.write_char(*ch)?;
                }
                Ok(())
            }
        }
    }
}
