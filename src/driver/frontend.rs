//! MAC front-end orchestrator.
//!
//! Wires a [`MacCore`] to the user logic across three clock domains:
//!
//! ```text
//!   logic domain                 tx domain            rx domain
//!   ────────────                 ─────────            ─────────
//!   tx words ──► [ tx queue W→1 ] ──► MAC tx
//!   status  ◄──  underflow ◄───────── toggle ◄── MAC tx
//!   status  ◄──  speed ◄───────────── vector ◄── MAC tx
//!   rx words ◄── [ rx queue 1→W ] ◄───────────────────── MAC rx
//!   status  ◄──  bad frame, bad fcs ◄──────────── toggle ◄── MAC rx
//! ```
//!
//! Each domain is advanced by its own `tick_*` method, which takes that
//! domain's reset and touches only state belonging to that domain. The
//! caller decides the interleaving, normally from a
//! [`ClockSchedule`](crate::sim::ClockSchedule).
//!
//! With [`RxQueueMode::External`] the receive queue is supplied outside the
//! front-end: `tick_rx` hands out the raw receive byte and a reset re-timed
//! from the logic domain, and `tick_logic` passes the external queue's output
//! through. The internal receive queue status is then tied idle.
//!
//! The MAC cannot stall, so the internal receive queue always runs with
//! `drop_when_full`: a frame that does not fit is dropped whole with one
//! overflow pulse. Receive bytes are only refused while the queue is in
//! reset.
//!
//! Event crossings are never reset; their outputs are masked while the
//! logic domain is in reset.

use crate::cdc::{ResetSync, ToggleSync, VectorSync};
use crate::driver::config::{FrontEndConfig, RxQueueMode};
use crate::driver::error::ConfigResult;
use crate::driver::status::{LogicStatus, QueueStatus};
use crate::internal::constants::{DEFAULT_QUEUE_DEPTH, DEFAULT_WORD_BYTES};
use crate::phy::{MacCore, PhyBeat, Speed};
use crate::queue::{Beat, FramedQueueAdapter};

// =============================================================================
// Per-Domain Inputs and Outputs
// =============================================================================

/// Logic-domain inputs for one logic cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicInputs<const W: usize> {
    /// Logic-domain reset
    pub rst: bool,
    /// Transmit word offered this cycle
    pub tx: Option<Beat<W>>,
    /// The logic accepts a receive word this cycle
    pub rx_ready: bool,
    /// Word presented by an external receive queue
    pub external_rx: Option<Beat<W>>,
}

impl<const W: usize> Default for LogicInputs<W> {
    fn default() -> Self {
        Self {
            rst: false,
            tx: None,
            rx_ready: true,
            external_rx: None,
        }
    }
}

/// Logic-domain outputs of one logic cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicOutputs<const W: usize> {
    /// The offered transmit word was accepted
    pub tx_accepted: bool,
    /// Receive word transferred to the logic
    pub rx: Option<Beat<W>>,
    /// Ready returned to an external receive queue
    pub external_rx_ready: bool,
    /// Synchronized status
    pub status: LogicStatus,
}

impl<const W: usize> Default for LogicOutputs<W> {
    fn default() -> Self {
        Self {
            tx_accepted: false,
            rx: None,
            external_rx_ready: false,
            status: LogicStatus::default(),
        }
    }
}

/// Transmit-domain outputs of one transmit cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxOutputs {
    /// Byte handed to the MAC
    pub sent: Option<PhyBeat>,
    /// The MAC reported underflow
    pub underflow: bool,
}

/// Receive-domain outputs of one receive cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxOutputs {
    /// Byte taken into the internal receive queue
    pub received: Option<PhyBeat>,
    /// Raw receive byte for an external queue
    pub external: Option<PhyBeat>,
    /// Reset for an external queue, in the receive domain
    pub external_reset: bool,
}

// =============================================================================
// Front-End
// =============================================================================

#[allow(clippy::large_enum_variant)]
enum RxPath<const DEPTH: usize, const W: usize> {
    Internal(FramedQueueAdapter<DEPTH, 1, W>),
    External { reset: ResetSync },
}

/// Clock-domain-crossing front-end for a byte-wide MAC.
///
/// # Type Parameters
///
/// - `M`: the physical MAC
/// - `TX_DEPTH`: transmit queue depth in bytes (power of two)
/// - `RX_DEPTH`: receive queue depth in bytes (power of two)
/// - `W`: logic-side word width in bytes
///
/// # Example
///
/// ```ignore
/// let mut front = MacFrontEnd::<_, 4096, 4096, 8>::new(mac, FrontEndConfig::new())?;
/// let mut sched = ClockSchedule::front_end(tx_clk, rx_clk, logic_clk)?;
///
/// loop {
///     let edges = sched.advance();
///     if edges.has(Domain::Tx) {
///         front.tick_tx(false);
///     }
///     if edges.has(Domain::Rx) {
///         front.tick_rx(false);
///     }
///     if edges.has(Domain::Logic) {
///         let out = front.tick_logic(LogicInputs { tx: next_word(), ..Default::default() });
///     }
/// }
/// ```
pub struct MacFrontEnd<M: MacCore, const TX_DEPTH: usize, const RX_DEPTH: usize, const W: usize> {
    mac: M,
    config: FrontEndConfig,
    tx_queue: FramedQueueAdapter<TX_DEPTH, W, 1>,
    rx_path: RxPath<RX_DEPTH, W>,
    tx_errors: ToggleSync,
    rx_errors: ToggleSync,
    speed: VectorSync,
    logic_rst: bool,
}

impl<M: MacCore, const TX_DEPTH: usize, const RX_DEPTH: usize, const W: usize>
    MacFrontEnd<M, TX_DEPTH, RX_DEPTH, W>
{
    /// Build a front-end around `mac`.
    ///
    /// Fails if any queue geometry or synchronizer depth is invalid, or if
    /// the internal receive queue could back-pressure the MAC.
    pub fn new(mac: M, config: FrontEndConfig) -> ConfigResult<Self> {
        config.validate()?;

        let rx_path = match config.rx_queue_mode {
            RxQueueMode::Internal => RxPath::Internal(FramedQueueAdapter::new(config.rx_queue)?),
            RxQueueMode::External => RxPath::External {
                reset: ResetSync::new(config.reset_stages)?,
            },
        };

        Ok(Self {
            mac,
            config,
            tx_queue: FramedQueueAdapter::new(config.tx_queue)?,
            rx_path,
            tx_errors: ToggleSync::new(config.sync_stages)?,
            rx_errors: ToggleSync::new(config.sync_stages)?,
            speed: VectorSync::new(
                config.sync_stages,
                Speed::default().bits(),
                config.speed_min_hold,
            )?,
            logic_rst: false,
        })
    }

    /// Front-end configuration
    pub const fn config(&self) -> &FrontEndConfig {
        &self.config
    }

    /// The physical MAC
    pub const fn mac(&self) -> &M {
        &self.mac
    }

    /// Mutable access to the physical MAC
    pub fn mac_mut(&mut self) -> &mut M {
        &mut self.mac
    }

    /// Transmit queue
    pub const fn tx_queue(&self) -> &FramedQueueAdapter<TX_DEPTH, W, 1> {
        &self.tx_queue
    }

    /// Internal receive queue; `None` in external mode
    pub fn rx_queue(&self) -> Option<&FramedQueueAdapter<RX_DEPTH, 1, W>> {
        match &self.rx_path {
            RxPath::Internal(queue) => Some(queue),
            RxPath::External { .. } => None,
        }
    }

    /// Synchronized external queue reset as an input pin; `None` in internal mode
    pub fn external_reset_pin(&mut self) -> Option<&mut ResetSync> {
        match &mut self.rx_path {
            RxPath::Internal(_) => None,
            RxPath::External { reset } => Some(reset),
        }
    }

    /// Whether a transmit word offered now would be accepted
    pub fn tx_ready(&self) -> bool {
        self.tx_queue.producer_ready()
    }

    /// Speed changes that did not hold for `speed_min_hold` transmit cycles
    pub const fn speed_hold_violations(&self) -> u32 {
        self.speed.hold_violations()
    }

    // =========================================================================
    // Transmit Domain
    // =========================================================================

    /// One transmit clock edge
    pub fn tick_tx(&mut self, rst: bool) -> TxOutputs {
        if rst {
            self.mac.reset_tx();
            self.tx_queue.clock_consumer(true, false);
            self.tx_errors.clock_source(0);
            self.speed.reset_source();
            return TxOutputs::default();
        }

        let ready = self.mac.tx_ready();
        let read = self.tx_queue.clock_consumer(false, ready);
        let events = self.mac.clock_tx(read.beat, self.config.ifg_delay);
        #[cfg(feature = "defmt")]
        if events.underflow {
            defmt::warn!("tx underflow");
        }

        self.tx_errors.clock_source(events.bits());
        self.speed.clock_source(self.mac.speed().bits());

        TxOutputs {
            sent: read.beat,
            underflow: events.underflow,
        }
    }

    // =========================================================================
    // Receive Domain
    // =========================================================================

    /// One receive clock edge
    pub fn tick_rx(&mut self, rst: bool) -> RxOutputs {
        let events = if rst {
            self.mac.reset_rx();
            None
        } else {
            Some(self.mac.clock_rx())
        };
        self.rx_errors
            .clock_source(events.map_or(0, |e| e.error_bits()));
        let beat = events.and_then(|e| e.beat);

        match &mut self.rx_path {
            RxPath::Internal(queue) => {
                let write = queue.clock_producer(rst, beat.as_ref());
                #[cfg(feature = "defmt")]
                if beat.is_some() && !write.accepted {
                    defmt::warn!("rx byte lost: queue in reset");
                }
                RxOutputs {
                    received: beat.filter(|_| write.accepted),
                    external: None,
                    external_reset: false,
                }
            }
            RxPath::External { reset } => {
                let synced = reset.clock(self.logic_rst);
                RxOutputs {
                    received: None,
                    external: beat,
                    external_reset: rst || synced,
                }
            }
        }
    }

    // =========================================================================
    // Logic Domain
    // =========================================================================

    /// One logic clock edge
    pub fn tick_logic(&mut self, inputs: LogicInputs<W>) -> LogicOutputs<W> {
        let rst = inputs.rst;
        self.logic_rst = rst;

        let write = self.tx_queue.clock_producer(rst, inputs.tx.as_ref());
        let tx_errors = self.tx_errors.clock_sink();
        let rx_errors = self.rx_errors.clock_sink();
        let speed = if rst {
            self.speed.reset_sink();
            self.speed.sample()
        } else {
            self.speed.clock_sink()
        };

        let (rx, rx_fifo, external_rx_ready) = match &mut self.rx_path {
            RxPath::Internal(queue) => {
                let read = queue.clock_consumer(rst, inputs.rx_ready);
                (read.beat, read.status, false)
            }
            RxPath::External { .. } if rst => (None, QueueStatus::IDLE, false),
            RxPath::External { .. } => (
                inputs.external_rx.filter(|_| inputs.rx_ready),
                QueueStatus::IDLE,
                inputs.rx_ready,
            ),
        };

        let status = if rst {
            LogicStatus::from_parts(0, 0, QueueStatus::IDLE, QueueStatus::IDLE, speed.value)
        } else {
            LogicStatus::from_parts(tx_errors, rx_errors, write.status, rx_fifo, speed.value)
        };
        #[cfg(feature = "defmt")]
        if speed.changed {
            defmt::debug!("link speed: {=u8:#04b}", speed.value);
        }

        LogicOutputs {
            tx_accepted: write.accepted,
            rx,
            external_rx_ready,
            status,
        }
    }
}

impl<M: MacCore, const TX_DEPTH: usize, const RX_DEPTH: usize, const W: usize> core::fmt::Debug
    for MacFrontEnd<M, TX_DEPTH, RX_DEPTH, W>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MacFrontEnd")
            .field("config", &self.config)
            .field("tx_queue", &self.tx_queue)
            .field("rx_queue", &self.rx_queue())
            .finish_non_exhaustive()
    }
}

/// Default front-end: 4 KiB queues, 64-bit logic words
pub type MacFrontEndDefault<M> =
    MacFrontEnd<M, DEFAULT_QUEUE_DEPTH, DEFAULT_QUEUE_DEPTH, DEFAULT_WORD_BYTES>;

/// Byte-wide front-end with small queues
pub type MacFrontEndSmall<M> = MacFrontEnd<M, 2048, 2048, 1>;

// =============================================================================
// Unit Tests
// =============================================================================
