//! Stream words.
//!
//! A [`Beat`] is one transfer on a framed byte stream: up to `W` data bytes
//! with a byte-validity mask, an end-of-frame marker and an error flag that
//! is only meaningful on the end-of-frame word.
//!
//! Valid bytes are packed from lane 0 upward. Only the end-of-frame word may
//! be partial.

use crate::driver::error::{StreamError, StreamResult};

/// One stream transfer of up to `W` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Beat<const W: usize> {
    /// Data lanes
    pub data: [u8; W],
    /// Byte-validity mask, bit `i` covers `data[i]`
    pub keep: u32,
    /// End-of-frame marker
    pub last: bool,
    /// Error/abort flag, valid with `last`
    pub user: bool,
}

impl<const W: usize> Default for Beat<W> {
    fn default() -> Self {
        Self {
            data: [0; W],
            keep: 0,
            last: false,
            user: false,
        }
    }
}

impl<const W: usize> Beat<W> {
    /// Mask covering all `W` lanes
    pub const FULL_KEEP: u32 = keep_mask(W);

    /// Build a word from `bytes`. A word shorter than `W` is padded and masked.
    pub fn from_slice(bytes: &[u8], last: bool) -> StreamResult<Self> {
        if bytes.len() > W {
            return Err(StreamError::TooLong);
        }
        if bytes.is_empty() {
            return Err(StreamError::Empty);
        }
        let mut beat = Self {
            keep: keep_mask(bytes.len()),
            last,
            ..Self::default()
        };
        beat.data[..bytes.len()].copy_from_slice(bytes);
        Ok(beat)
    }

    /// Single-byte word
    pub fn byte(value: u8, last: bool) -> Self {
        let mut beat = Self {
            keep: 1,
            last,
            ..Self::default()
        };
        beat.data[0] = value;
        beat
    }

    /// Same word with the error flag set
    #[must_use]
    pub const fn with_error(mut self, error: bool) -> Self {
        self.user = error;
        self
    }

    /// Number of valid bytes
    #[inline]
    pub const fn len(&self) -> usize {
        (self.keep & Self::FULL_KEEP).count_ones() as usize
    }

    /// True when no lane is valid
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Valid bytes in lane order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < 32 && self.keep & (1 << i) != 0)
            .map(|(_, b)| *b)
    }

    /// True if this word ends a frame flagged bad
    #[inline]
    pub const fn is_bad_end(&self) -> bool {
        self.last && self.user
    }
}

/// Keep mask with the low `n` lanes set.
pub(crate) const fn keep_mask(n: usize) -> u32 {
    if n >= 32 { u32::MAX } else { (1u32 << n) - 1 }
}
