//! Vector-on-change synchronizer for narrow, slowly changing levels.
//!
//! The source holds the whole vector in one register; the destination
//! samples that register through a [`SyncChain`] and raises a one-cycle
//! `changed` pulse whenever the synchronized value differs from the
//! previous one.
//!
//! There is no per-bit handshake. A destination sample is only guaranteed
//! to be a value the source really held if the vector stays stable for
//! longer than the destination needs to settle the chain. The source side
//! counts how long each value was held and records every change that came
//! sooner than `min_hold` source cycles as a hold violation, so the
//! assumption can be checked against real traffic.

use super::chain::SyncChain;
use crate::driver::error::ConfigResult;

/// Source half: the vector register and its hold-time monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VectorSource {
    value: u8,
    init: u8,
    held: u32,
    min_hold: u32,
    violations: u32,
}

impl VectorSource {
    /// Create a source holding `init`, expecting every value to stay for at
    /// least `min_hold` source cycles.
    pub const fn new(init: u8, min_hold: u32) -> Self {
        Self {
            value: init,
            init,
            held: u32::MAX,
            min_hold,
            violations: 0,
        }
    }

    /// One source clock edge registering `value`.
    pub fn clock(&mut self, value: u8) {
        if value == self.value {
            self.held = self.held.saturating_add(1);
            return;
        }

        if self.held < self.min_hold {
            self.violations = self.violations.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "vector changed after {} cycles (min {})",
                self.held,
                self.min_hold
            );
        }
        self.value = value;
        self.held = 1;
    }

    /// Register value seen by the destination domain
    #[inline(always)]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Changes that arrived sooner than the hold time
    pub const fn hold_violations(&self) -> u32 {
        self.violations
    }

    /// Source-domain reset. The violation count survives.
    pub fn reset(&mut self) {
        self.value = self.init;
        self.held = u32::MAX;
    }
}

/// One synchronized destination observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VectorSample {
    /// Synchronized vector
    pub value: u8,
    /// Set for exactly one cycle after each change of `value`
    pub changed: bool,
}

/// Destination half: resynchronization chain plus change detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VectorSink {
    chain: SyncChain<u8>,
    prev: u8,
    init: u8,
}

impl VectorSink {
    /// Create a sink whose registers reset to `init`
    pub fn new(stages: u8, init: u8) -> ConfigResult<Self> {
        Ok(Self {
            chain: SyncChain::new(stages, init)?,
            prev: init,
            init,
        })
    }

    /// One destination clock edge sampling the source register.
    #[inline]
    pub fn clock(&mut self, value: u8) -> VectorSample {
        self.prev = self.chain.output();
        self.chain.clock(value);
        self.sample()
    }

    /// Observation for the current destination cycle
    #[inline]
    pub fn sample(&self) -> VectorSample {
        let value = self.chain.output();
        VectorSample {
            value,
            changed: value != self.prev,
        }
    }

    /// Destination-domain reset
    pub fn reset(&mut self) {
        self.chain.reset();
        self.prev = self.init;
    }
}

/// Source and destination halves of one vector crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VectorSync {
    source: VectorSource,
    sink: VectorSink,
}

impl VectorSync {
    /// Create a crossing resetting to `init` on both sides
    pub fn new(stages: u8, init: u8, min_hold: u32) -> ConfigResult<Self> {
        Ok(Self {
            source: VectorSource::new(init, min_hold),
            sink: VectorSink::new(stages, init)?,
        })
    }

    /// Source clock edge registering the current vector
    #[inline]
    pub fn clock_source(&mut self, value: u8) {
        self.source.clock(value);
    }

    /// Destination clock edge
    #[inline]
    pub fn clock_sink(&mut self) -> VectorSample {
        self.sink.clock(self.source.value())
    }

    /// Observation for the current destination cycle
    #[inline]
    pub fn sample(&self) -> VectorSample {
        self.sink.sample()
    }

    /// Changes that broke the hold-time assumption
    pub const fn hold_violations(&self) -> u32 {
        self.source.hold_violations()
    }

    /// Source-domain reset
    pub fn reset_source(&mut self) {
        self.source.reset();
    }

    /// Destination-domain reset
    pub fn reset_sink(&mut self) {
        self.sink.reset();
    }
}
