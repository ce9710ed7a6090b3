//! Reset synchronizer.
//!
//! Re-times a reset level from a driving domain into a destination domain:
//! assertion is taken on the first destination edge that sees it (or
//! immediately through [`ResetSync::assert_async`]), release only after the
//! input has been sampled low on `stages` consecutive destination edges.
//!
//! The synchronized output implements [`embedded_hal::digital::InputPin`],
//! high while reset is asserted.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use super::chain::SyncChain;
use crate::driver::error::ConfigResult;

/// Reset cascade for one destination domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetSync {
    chain: SyncChain<bool>,
}

impl ResetSync {
    /// Create a synchronizer with a `stages`-deep cascade, asserted at power-up.
    pub fn new(stages: u8) -> ConfigResult<Self> {
        Ok(Self {
            chain: SyncChain::new(stages, true)?,
        })
    }

    /// Create a synchronizer whose cascade has already drained.
    ///
    /// For crossings built alongside state that is itself freshly reset.
    pub fn released(stages: u8) -> ConfigResult<Self> {
        Ok(Self {
            chain: SyncChain::new(stages, false)?,
        })
    }

    /// Cascade length
    pub const fn stages(&self) -> usize {
        self.chain.depth()
    }

    /// One destination clock edge sampling the driving reset level.
    ///
    /// Returns the synchronized reset for the following destination cycle.
    pub fn clock(&mut self, rst_in: bool) -> bool {
        if rst_in {
            #[cfg(feature = "defmt")]
            if !self.is_asserted() {
                defmt::debug!("reset sync: assert");
            }
            self.chain.fill(true);
        } else {
            #[cfg(feature = "defmt")]
            let was = self.is_asserted();
            self.chain.clock(false);
            #[cfg(feature = "defmt")]
            if was && !self.is_asserted() {
                defmt::debug!("reset sync: release");
            }
        }
        self.is_asserted()
    }

    /// Assert without waiting for a destination edge.
    pub fn assert_async(&mut self) {
        self.chain.fill(true);
    }

    /// Current synchronized reset level
    #[inline(always)]
    pub fn is_asserted(&self) -> bool {
        self.chain.output()
    }
}

impl ErrorType for ResetSync {
    type Error = Infallible;
}

impl InputPin for ResetSync {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_asserted())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_asserted())
    }
}
