//! Toggle synchronizer for single-cycle events.
//!
//! The source domain turns each event into a level change of a toggle
//! register. The destination samples that level through a [`SyncChain`] and
//! compares the chain output with its previous value: any difference is a
//! one-cycle pulse.
//!
//! Up to eight independent event lanes share one instance; each bit of the
//! event mask has its own toggle register.
//!
//! # Coalescing
//!
//! Two events on the same lane that land before the destination has sampled
//! the intermediate toggle level cancel out in the level and can be
//! reported as one pulse, or none if an even number collapse together.
//! Pulse counts are exact only while events on a lane are spaced wider than
//! one destination sample window. Status use is fine; counters that must be
//! exact need a different primitive.
//!
//! # Resets
//!
//! The toggle register and the sink chain reset to the same level, so a
//! reset applied to both halves together leaves no pulse. A reset applied
//! to one half alone changes the level the other half holds and is read as
//! one event on every lane that was at 1. Crossings whose two domains reset
//! independently are therefore left running through resets, and the reader
//! masks the sink output while its own domain is in reset. The framed queue
//! and the front-end status crossings work this way.

use super::chain::SyncChain;
use crate::driver::error::ConfigResult;

/// Source half: one toggle register per event lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleSource {
    level: u8,
}

impl ToggleSource {
    /// Create a source with all lanes at the reset level
    pub const fn new() -> Self {
        Self { level: 0 }
    }

    /// One source clock edge. Each set bit in `events` flips its lane.
    #[inline]
    pub fn clock(&mut self, events: u8) {
        self.level ^= events;
    }

    /// Toggle register value seen by the destination domain
    #[inline(always)]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Source-domain reset
    pub fn reset(&mut self) {
        self.level = 0;
    }
}

/// Destination half: resynchronization chain plus edge register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleSink {
    chain: SyncChain<u8>,
    edge: u8,
}

impl ToggleSink {
    /// Create a sink with a `stages`-deep chain
    pub fn new(stages: u8) -> ConfigResult<Self> {
        Ok(Self {
            chain: SyncChain::new(stages, 0)?,
            edge: 0,
        })
    }

    /// One destination clock edge sampling the source toggle `level`.
    ///
    /// Returns the pulse mask valid for the following destination cycle.
    #[inline]
    pub fn clock(&mut self, level: u8) -> u8 {
        self.edge = self.chain.output();
        self.chain.clock(level);
        self.pulses()
    }

    /// Lanes pulsing in the current destination cycle
    #[inline(always)]
    pub fn pulses(&self) -> u8 {
        self.chain.output() ^ self.edge
    }

    /// Destination-domain reset. Matches the source reset level, so no pulse
    /// appears when both sides leave reset.
    pub fn reset(&mut self) {
        self.chain.reset();
        self.edge = 0;
    }
}

/// Source and destination halves of one event crossing.
///
/// The two `clock_*` methods must each be called only from their own
/// domain's tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleSync {
    source: ToggleSource,
    sink: ToggleSink,
}

impl ToggleSync {
    /// Create a crossing with a `stages`-deep destination chain
    pub fn new(stages: u8) -> ConfigResult<Self> {
        Ok(Self {
            source: ToggleSource::new(),
            sink: ToggleSink::new(stages)?,
        })
    }

    /// Source clock edge carrying this cycle's events
    #[inline]
    pub fn clock_source(&mut self, events: u8) {
        self.source.clock(events);
    }

    /// Destination clock edge; returns the pulse mask for the next cycle
    #[inline]
    pub fn clock_sink(&mut self) -> u8 {
        self.sink.clock(self.source.level())
    }

    /// Pulse mask of the current destination cycle
    #[inline(always)]
    pub fn pulses(&self) -> u8 {
        self.sink.pulses()
    }

    /// Source-domain reset.
    ///
    /// Only pulse-free when the sink is reset before it samples again; see
    /// the module docs.
    pub fn reset_source(&mut self) {
        self.source.reset();
    }

    /// Destination-domain reset
    pub fn reset_sink(&mut self) {
        self.sink.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_event_yields_single_pulse_after_chain_latency() {
        let mut sync = ToggleSync::new(2).unwrap();

        sync.clock_source(0b1);
        assert_eq!(sync.clock_sink(), 0);
        assert_eq!(sync.clock_sink(), 0b1);
        assert_eq!(sync.clock_sink(), 0);
        assert_eq!(sync.clock_sink(), 0);
    }

    #[test]
    fn spaced_events_count_exactly() {
        // Destination runs at the source rate; one event every 3 cycles.
        let mut sync = ToggleSync::new(2).unwrap();
        let mut sent = 0;
        let mut seen = 0;

        for cycle in 0..300 {
            let event = u8::from(cycle % 3 == 0);
            sent += u32::from(event);
            sync.clock_source(event);
            seen += u32::from(sync.clock_sink() & 1);
        }
        for _ in 0..4 {
            seen += u32::from(sync.clock_sink() & 1);
        }

        assert_eq!(seen, sent);
    }

    #[test]
    fn burst_on_one_lane_coalesces() {
        let mut sync = ToggleSync::new(2).unwrap();

        // Three events before the destination samples anything.
        sync.clock_source(1);
        sync.clock_source(1);
        sync.clock_source(1);

        let mut seen = 0;
        for _ in 0..4 {
            seen += u32::from(sync.clock_sink() & 1);
        }
        assert_eq!(seen, 1);
    }

    #[test]
    fn independent_lanes_do_not_coalesce() {
        let mut sync = ToggleSync::new(3).unwrap();

        sync.clock_source(0b11);
        let mut seen = 0u8;
        for _ in 0..5 {
            seen |= sync.clock_sink();
        }
        assert_eq!(seen, 0b11);
    }

    #[test]
    fn matched_reset_produces_no_pulse() {
        let mut sync = ToggleSync::new(2).unwrap();
        sync.clock_source(1);
        sync.clock_sink();
        sync.clock_sink();

        sync.reset_source();
        sync.reset_sink();

        for _ in 0..4 {
            assert_eq!(sync.clock_sink(), 0);
        }
    }

    #[test]
    fn source_only_reset_reads_as_event() {
        let mut sync = ToggleSync::new(2).unwrap();
        sync.clock_source(0b01);
        for _ in 0..4 {
            sync.clock_sink();
        }

        sync.reset_source();

        let mut seen = 0;
        for _ in 0..4 {
            seen += u32::from(sync.clock_sink() & 1);
        }
        assert_eq!(seen, 1);
    }

    #[test]
    fn unreset_crossing_reports_each_event_once() {
        let mut sync = ToggleSync::new(2).unwrap();
        let mut seen = 0;

        sync.clock_source(0b01);
        for _ in 0..4 {
            seen += u32::from(sync.clock_sink() & 1);
        }
        // Source domain held in reset: the crossing keeps its level.
        for _ in 0..4 {
            sync.clock_source(0);
            seen += u32::from(sync.clock_sink() & 1);
        }
        sync.clock_source(0b01);
        for _ in 0..4 {
            seen += u32::from(sync.clock_sink() & 1);
        }

        assert_eq!(seen, 2);
    }
}
