//! Status outputs of the queues and the front-end.
//!
//! [`QueueStatus`] holds the per-cycle pulses of one framed queue.
//! [`LogicStatus`] collects every logic-domain status output of the
//! front-end: one-cycle pulses plus the persistent speed vector.

use crate::internal::constants::SPEED_MASK;
use crate::phy::Speed;

// =============================================================================
// Queue Status
// =============================================================================

/// Event lane: a frame was discarded for lack of space
pub const QUEUE_OVERFLOW: u8 = 1 << 0;
/// Event lane: a frame ending with the error flag was discarded
pub const QUEUE_BAD_FRAME: u8 = 1 << 1;
/// Event lane: a frame was committed
pub const QUEUE_GOOD_FRAME: u8 = 1 << 2;

/// One cycle of framed-queue status pulses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueStatus {
    /// Frame dropped on overflow
    pub overflow: bool,
    /// Frame dropped as bad
    pub bad_frame: bool,
    /// Frame committed
    pub good_frame: bool,
}

impl QueueStatus {
    /// No pulses: the tie-off value of an unused queue
    pub const IDLE: Self = Self {
        overflow: false,
        bad_frame: false,
        good_frame: false,
    };

    /// Create from an event-lane mask
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            overflow: bits & QUEUE_OVERFLOW != 0,
            bad_frame: bits & QUEUE_BAD_FRAME != 0,
            good_frame: bits & QUEUE_GOOD_FRAME != 0,
        }
    }

    /// Convert to an event-lane mask for a toggle synchronizer
    #[inline]
    pub const fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.overflow {
            bits |= QUEUE_OVERFLOW;
        }
        if self.bad_frame {
            bits |= QUEUE_BAD_FRAME;
        }
        if self.good_frame {
            bits |= QUEUE_GOOD_FRAME;
        }
        bits
    }

    /// Check if any pulse is set
    #[inline]
    pub const fn any(&self) -> bool {
        self.bits() != 0
    }
}

// =============================================================================
// Logic-Domain Status
// =============================================================================

/// Event lane of the transmit-domain crossing: MAC underflow
pub const TX_ERROR_UNDERFLOW: u8 = 1 << 0;
/// Event lane of the receive-domain crossing: bad frame
pub const RX_ERROR_BAD_FRAME: u8 = 1 << 0;
/// Event lane of the receive-domain crossing: bad frame check sequence
pub const RX_ERROR_BAD_FCS: u8 = 1 << 1;

/// Logic-domain status outputs for one logic cycle.
///
/// # Example
///
/// ```ignore
/// let out = front_end.tick_logic(inputs);
/// if out.status.rx_fifo_overflow {
///     rx_overflow_count += 1;
/// }
/// if out.status.has_error() {
///     // raise an alarm
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicStatus {
    /// MAC ran out of transmit data mid-frame
    pub tx_error_underflow: bool,
    /// Transmit queue dropped a frame on overflow
    pub tx_fifo_overflow: bool,
    /// Transmit queue dropped a bad frame
    pub tx_fifo_bad_frame: bool,
    /// Transmit queue committed a frame
    pub tx_fifo_good_frame: bool,
    /// MAC received a malformed frame
    pub rx_error_bad_frame: bool,
    /// MAC received a frame with a bad checksum
    pub rx_error_bad_fcs: bool,
    /// Receive queue dropped a frame on overflow
    pub rx_fifo_overflow: bool,
    /// Receive queue dropped a bad frame
    pub rx_fifo_bad_frame: bool,
    /// Receive queue committed a frame
    pub rx_fifo_good_frame: bool,
    /// Negotiated speed, 2-bit level
    pub speed: u8,
}

impl Default for LogicStatus {
    fn default() -> Self {
        Self {
            tx_error_underflow: false,
            tx_fifo_overflow: false,
            tx_fifo_bad_frame: false,
            tx_fifo_good_frame: false,
            rx_error_bad_frame: false,
            rx_error_bad_fcs: false,
            rx_fifo_overflow: false,
            rx_fifo_bad_frame: false,
            rx_fifo_good_frame: false,
            speed: Speed::default().bits(),
        }
    }
}

impl LogicStatus {
    /// Assemble from the synchronized lanes and queue statuses
    pub const fn from_parts(
        tx_errors: u8,
        rx_errors: u8,
        tx_fifo: QueueStatus,
        rx_fifo: QueueStatus,
        speed: u8,
    ) -> Self {
        Self {
            tx_error_underflow: tx_errors & TX_ERROR_UNDERFLOW != 0,
            tx_fifo_overflow: tx_fifo.overflow,
            tx_fifo_bad_frame: tx_fifo.bad_frame,
            tx_fifo_good_frame: tx_fifo.good_frame,
            rx_error_bad_frame: rx_errors & RX_ERROR_BAD_FRAME != 0,
            rx_error_bad_fcs: rx_errors & RX_ERROR_BAD_FCS != 0,
            rx_fifo_overflow: rx_fifo.overflow,
            rx_fifo_bad_frame: rx_fifo.bad_frame,
            rx_fifo_good_frame: rx_fifo.good_frame,
            speed: speed & SPEED_MASK,
        }
    }

    /// Receive queue pulses
    pub const fn rx_fifo(&self) -> QueueStatus {
        QueueStatus {
            overflow: self.rx_fifo_overflow,
            bad_frame: self.rx_fifo_bad_frame,
            good_frame: self.rx_fifo_good_frame,
        }
    }

    /// Transmit queue pulses
    pub const fn tx_fifo(&self) -> QueueStatus {
        QueueStatus {
            overflow: self.tx_fifo_overflow,
            bad_frame: self.tx_fifo_bad_frame,
            good_frame: self.tx_fifo_good_frame,
        }
    }

    /// Decoded speed, `None` for the reserved encoding
    pub const fn link_speed(&self) -> Option<Speed> {
        Speed::from_bits(self.speed)
    }

    /// Check if any pulse is set (the speed level is not a pulse)
    #[inline]
    pub fn any(&self) -> bool {
        self.tx_error_underflow
            || self.tx_fifo().any()
            || self.rx_error_bad_frame
            || self.rx_error_bad_fcs
            || self.rx_fifo().any()
    }

    /// Check if any error pulse is set
    #[inline]
    pub fn has_error(&self) -> bool {
        self.tx_error_underflow
            || self.tx_fifo_overflow
            || self.tx_fifo_bad_frame
            || self.rx_error_bad_frame
            || self.rx_error_bad_fcs
            || self.rx_fifo_overflow
            || self.rx_fifo_bad_frame
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_status_bits_round_trip_each_lane() {
        for bits in [QUEUE_OVERFLOW, QUEUE_BAD_FRAME, QUEUE_GOOD_FRAME] {
            assert_eq!(QueueStatus::from_bits(bits).bits(), bits);
        }
        assert!(!QueueStatus::IDLE.any());
    }

    #[test]
    fn logic_status_default_is_idle_at_gigabit() {
        let status = LogicStatus::default();

        assert!(!status.any());
        assert!(!status.has_error());
        assert_eq!(status.link_speed(), Some(Speed::Mbps1000));
    }

    #[test]
    fn from_parts_maps_lanes() {
        let status = LogicStatus::from_parts(
            TX_ERROR_UNDERFLOW,
            RX_ERROR_BAD_FCS,
            QueueStatus::from_bits(QUEUE_GOOD_FRAME),
            QueueStatus::from_bits(QUEUE_OVERFLOW),
            0b01,
        );

        assert!(status.tx_error_underflow);
        assert!(!status.rx_error_bad_frame);
        assert!(status.rx_error_bad_fcs);
        assert!(status.tx_fifo_good_frame);
        assert!(status.rx_fifo_overflow);
        assert_eq!(status.link_speed(), Some(Speed::Mbps100));
        assert!(status.has_error());
    }

    #[test]
    fn good_frame_alone_is_not_an_error() {
        let status = LogicStatus::from_parts(
            0,
            0,
            QueueStatus::from_bits(QUEUE_GOOD_FRAME),
            QueueStatus::IDLE,
            0b10,
        );

        assert!(status.any());
        assert!(!status.has_error());
    }

    #[test]
    fn reserved_speed_encoding_decodes_to_none() {
        let status = LogicStatus::from_parts(0, 0, QueueStatus::IDLE, QueueStatus::IDLE, 0b11);
        assert_eq!(status.link_speed(), None);
    }
}
