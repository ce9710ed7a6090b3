//! Centralized Constants
//!
//! Single source of truth for the numbers shared by the synchronizers,
//! the framed queues and the front-end orchestrator.
//!
//! # Organization
//!
//! - **Synchronizer depths**: resynchronization and reset cascade lengths
//! - **Stream geometry**: word widths and queue depths
//! - **MAC defaults**: inter-frame gap and link speed encoding

// =============================================================================
// Synchronizer Depths
// =============================================================================

/// Upper bound on the number of registers in a resynchronization chain
pub const MAX_SYNC_STAGES: usize = 8;

/// Minimum number of registers needed to resolve a cross-domain sample
pub const MIN_SYNC_STAGES: u8 = 2;

/// Default resynchronization chain depth for events, vectors and pointers
pub const DEFAULT_SYNC_STAGES: u8 = 2;

/// Default reset synchronizer cascade length
pub const DEFAULT_RESET_STAGES: u8 = 4;

// =============================================================================
// Stream Geometry
// =============================================================================

/// Widest stream word supported (bytes), bounded by the 32-bit keep mask
pub const MAX_WORD_BYTES: usize = 32;

/// Physical-layer stream word width (bytes)
pub const PHY_WORD_BYTES: usize = 1;

/// Default logic-side stream word width (bytes)
pub const DEFAULT_WORD_BYTES: usize = 8;

/// Default queue depth in bytes
pub const DEFAULT_QUEUE_DEPTH: usize = 4096;

/// Deepest registered output pipeline on the consumer side of a queue
pub const MAX_OUTPUT_PIPELINE: usize = 4;

/// Default registered output pipeline length
pub const DEFAULT_OUTPUT_PIPELINE: u8 = 2;

// =============================================================================
// MAC Defaults
// =============================================================================

/// Default inter-frame gap in transmit cycles (96 bit times at one byte per cycle)
pub const DEFAULT_IFG_DELAY: u8 = 12;

/// 2-bit speed encoding: 10 Mbps
pub const SPEED_BITS_10M: u8 = 0b00;

/// 2-bit speed encoding: 100 Mbps
pub const SPEED_BITS_100M: u8 = 0b01;

/// 2-bit speed encoding: 1000 Mbps (also the power-up value)
pub const SPEED_BITS_1G: u8 = 0b10;

/// Mask of the negotiated speed vector
pub const SPEED_MASK: u8 = 0b11;
