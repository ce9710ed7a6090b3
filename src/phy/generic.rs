//! Generic MAC Core Trait
//!
//! The physical MAC (line coding, checksum, DDR sampling) lives outside this
//! crate. The front-end talks to it only through [`MacCore`]: one byte-wide
//! transmit stream in the transmit domain, one byte-wide receive stream in
//! the receive domain, their error events, and the negotiated speed.

use crate::driver::status::{RX_ERROR_BAD_FCS, RX_ERROR_BAD_FRAME, TX_ERROR_UNDERFLOW};
use crate::internal::constants::{
    PHY_WORD_BYTES, SPEED_BITS_1G, SPEED_BITS_10M, SPEED_BITS_100M, SPEED_MASK,
};
use crate::queue::Beat;

/// Physical-layer stream word: one byte
pub type PhyBeat = Beat<PHY_WORD_BYTES>;

// =============================================================================
// Link Speed
// =============================================================================

/// Negotiated link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1000 Mbps
    #[default]
    Mbps1000,
}

impl Speed {
    /// 2-bit encoding carried by the speed vector
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Speed::Mbps10 => SPEED_BITS_10M,
            Speed::Mbps100 => SPEED_BITS_100M,
            Speed::Mbps1000 => SPEED_BITS_1G,
        }
    }

    /// Decode a 2-bit speed vector; the fourth encoding is reserved
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & SPEED_MASK {
            SPEED_BITS_10M => Some(Speed::Mbps10),
            SPEED_BITS_100M => Some(Speed::Mbps100),
            SPEED_BITS_1G => Some(Speed::Mbps1000),
            _ => None,
        }
    }
}

// =============================================================================
// Per-Cycle Events
// =============================================================================

/// Transmit-domain events of one MAC cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxEvents {
    /// Transmit data ran dry mid-frame; the frame was aborted
    pub underflow: bool,
}

impl TxEvents {
    /// Event-lane mask for the transmit error crossing
    pub const fn bits(&self) -> u8 {
        if self.underflow { TX_ERROR_UNDERFLOW } else { 0 }
    }
}

/// Receive-domain output of one MAC cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxEvents {
    /// Received byte, if any
    pub beat: Option<PhyBeat>,
    /// Frame ended malformed
    pub bad_frame: bool,
    /// Frame ended with a checksum mismatch
    pub bad_fcs: bool,
}

impl RxEvents {
    /// Event-lane mask for the receive error crossing
    pub const fn error_bits(&self) -> u8 {
        let mut bits = 0;
        if self.bad_frame {
            bits |= RX_ERROR_BAD_FRAME;
        }
        if self.bad_fcs {
            bits |= RX_ERROR_BAD_FCS;
        }
        bits
    }
}

// =============================================================================
// MAC Core Trait
// =============================================================================

/// Trait for the physical MAC collaborator
///
/// Implementations are selected when the front-end is built: a GMII core, an
/// RGMII core with its DDR I/O primitives, or a host-side model all expose
/// the same per-domain cycle interface.
///
/// Each method belongs to one domain: `tx_ready`, `clock_tx`, `speed` and
/// `reset_tx` to the transmit domain; `clock_rx` and `reset_rx` to the
/// receive domain.
///
/// # Example Implementation
///
/// ```ignore
/// struct Sink { bytes: usize }
///
/// impl MacCore for Sink {
///     fn tx_ready(&self) -> bool { true }
///     fn clock_tx(&mut self, beat: Option<PhyBeat>, _ifg: u8) -> TxEvents {
///         self.bytes += usize::from(beat.is_some());
///         TxEvents::default()
///     }
///     fn clock_rx(&mut self) -> RxEvents { RxEvents::default() }
///     fn speed(&self) -> Speed { Speed::Mbps1000 }
///     fn reset_tx(&mut self) { self.bytes = 0; }
///     fn reset_rx(&mut self) {}
/// }
/// ```
pub trait MacCore {
    /// Whether the transmit side takes a byte in the current cycle
    fn tx_ready(&self) -> bool;

    /// One transmit clock edge.
    ///
    /// `beat` is the byte transferred at this edge. It is only `Some` when
    /// [`MacCore::tx_ready`] was true; `None` while ready means the queue had
    /// nothing to offer.
    fn clock_tx(&mut self, beat: Option<PhyBeat>, ifg_delay: u8) -> TxEvents;

    /// One receive clock edge
    fn clock_rx(&mut self) -> RxEvents;

    /// Negotiated speed, sampled in the transmit domain
    fn speed(&self) -> Speed;

    /// Transmit-domain reset
    fn reset_tx(&mut self);

    /// Receive-domain reset
    fn reset_rx(&mut self);
}
