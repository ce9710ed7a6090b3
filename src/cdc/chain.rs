//! Resynchronization chain.
//!
//! A cascade of registers clocked by the destination domain. The first
//! register samples a value owned by another domain; each later register
//! gives the previous one a full destination cycle to settle.

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{MAX_SYNC_STAGES, MIN_SYNC_STAGES};

/// Register cascade absorbing cross-domain sampling uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncChain<T: Copy> {
    stages: [T; MAX_SYNC_STAGES],
    depth: usize,
    init: T,
}

impl<T: Copy> SyncChain<T> {
    /// Create a chain of `depth` registers, all holding `init`.
    ///
    /// `depth` must lie in `MIN_SYNC_STAGES..=MAX_SYNC_STAGES`.
    pub fn new(depth: u8, init: T) -> ConfigResult<Self> {
        validate_depth(depth)?;
        Ok(Self {
            stages: [init; MAX_SYNC_STAGES],
            depth: depth as usize,
            init,
        })
    }

    /// Number of registers in the chain
    #[inline(always)]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// One destination clock edge: shift `input` in, return the new output.
    #[inline]
    pub fn clock(&mut self, input: T) -> T {
        self.stages.copy_within(0..self.depth - 1, 1);
        self.stages[0] = input;
        self.output()
    }

    /// Value held by the last register
    #[inline(always)]
    pub fn output(&self) -> T {
        self.stages[self.depth - 1]
    }

    /// Force every register to `value`.
    pub fn fill(&mut self, value: T) {
        self.stages = [value; MAX_SYNC_STAGES];
    }

    /// Return every register to the reset value.
    pub fn reset(&mut self) {
        self.fill(self.init);
    }
}

/// Check a chain depth against the supported range.
pub(crate) fn validate_depth(depth: u8) -> ConfigResult<()> {
    if depth < MIN_SYNC_STAGES || depth as usize > MAX_SYNC_STAGES {
        return Err(ConfigError::InvalidSyncStages);
    }
    Ok(())
}
