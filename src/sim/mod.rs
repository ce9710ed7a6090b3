//! Deterministic multi-clock edge scheduler.
//!
//! Each clock has a period and phase in picoseconds. [`ClockSchedule::advance`]
//! moves time to the next rising edge of any clock and reports which clocks
//! edge at that instant. Callers tick the corresponding domains in ascending
//! clock order, so a register sampled by a coincident edge sees either the
//! old or the new value depending on that order: the modelled outcome of a
//! metastable sample.

use crate::driver::error::{ConfigError, ConfigResult};

/// Upper bound on clocks in one schedule (one bit each in [`Edges`])
pub const MAX_CLOCKS: usize = 8;

// =============================================================================
// Domains
// =============================================================================

/// Clock domains of the MAC front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Domain {
    /// MAC transmit clock
    Tx,
    /// MAC receive clock
    Rx,
    /// User logic clock
    Logic,
}

impl Domain {
    /// All domains in tick order
    pub const ALL: [Domain; 3] = [Domain::Tx, Domain::Rx, Domain::Logic];

    /// Clock index within a front-end schedule
    pub const fn index(self) -> usize {
        match self {
            Domain::Tx => 0,
            Domain::Rx => 1,
            Domain::Logic => 2,
        }
    }
}

/// Set of clocks edging at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edges(u8);

impl Edges {
    /// Whether clock `index` edges
    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        index < MAX_CLOCKS && self.0 & (1 << index) != 0
    }

    /// Whether a front-end domain edges
    #[inline]
    pub const fn has(&self, domain: Domain) -> bool {
        self.contains(domain.index())
    }

    /// No clock edges
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Edging clock indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_CLOCKS).filter(|i| self.contains(*i))
    }
}

// =============================================================================
// Schedule
// =============================================================================

/// One clock's timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSpec {
    /// Period in picoseconds
    pub period_ps: u64,
    /// Time of the first rising edge in picoseconds
    pub phase_ps: u64,
}

impl ClockSpec {
    /// Clock whose first edge is at time zero
    pub const fn new(period_ps: u64) -> Self {
        Self {
            period_ps,
            phase_ps: 0,
        }
    }

    /// Set the first-edge offset
    #[must_use]
    pub const fn with_phase(mut self, phase_ps: u64) -> Self {
        self.phase_ps = phase_ps;
        self
    }
}

/// Edge scheduler for `N` independent clocks.
#[derive(Debug, Clone)]
pub struct ClockSchedule<const N: usize> {
    clocks: [ClockSpec; N],
    next: [u64; N],
    cycles: [u64; N],
    now_ps: u64,
}

impl<const N: usize> ClockSchedule<N> {
    /// Create a schedule; every period must be non-zero.
    pub fn new(clocks: [ClockSpec; N]) -> ConfigResult<Self> {
        if N == 0 || N > MAX_CLOCKS {
            return Err(ConfigError::InvalidConfig);
        }
        if clocks.iter().any(|c| c.period_ps == 0) {
            return Err(ConfigError::InvalidClockPeriod);
        }
        Ok(Self {
            clocks,
            next: clocks.map(|c| c.phase_ps),
            cycles: [0; N],
            now_ps: 0,
        })
    }

    /// Advance to the next edge and return the clocks edging there.
    pub fn advance(&mut self) -> Edges {
        let Some(t) = self.next.iter().copied().min() else {
            return Edges::default();
        };
        self.now_ps = t;

        let mut edges = 0u8;
        for i in 0..N {
            if self.next[i] == t {
                edges |= 1 << i;
                self.next[i] += self.clocks[i].period_ps;
                self.cycles[i] += 1;
            }
        }
        Edges(edges)
    }

    /// Time of the most recent edge
    pub const fn now_ps(&self) -> u64 {
        self.now_ps
    }

    /// Edges clock `index` has taken so far
    pub fn cycles(&self, index: usize) -> u64 {
        self.cycles.get(index).copied().unwrap_or(0)
    }
}

impl ClockSchedule<3> {
    /// Schedule for the transmit, receive and logic domains
    pub fn front_end(tx: ClockSpec, rx: ClockSpec, logic: ClockSpec) -> ConfigResult<Self> {
        Self::new([tx, rx, logic])
    }

    /// Edges a front-end domain has taken so far
    pub fn domain_cycles(&self, domain: Domain) -> u64 {
        self.cycles(domain.index())
    }
}

/// Source cycles a level must hold for a `stages`-deep destination chain to
/// capture it cleanly.
///
/// One destination period of settling plus `stages` periods of propagation,
/// rounded up to whole source cycles.
pub const fn min_hold_cycles(src_period_ps: u64, dst_period_ps: u64, stages: u8) -> u32 {
    if src_period_ps == 0 {
        return u32::MAX;
    }
    let window = (stages as u64 + 1) * dst_period_ps;
    let cycles = window.div_ceil(src_period_ps);
    if cycles > u32::MAX as u64 {
        u32::MAX
    } else {
        cycles as u32
    }
}
