//! Clock-domain crossing primitives.
//!
//! Every value that leaves its owning domain goes through one of these:
//!
//! - [`SyncChain`] - the resynchronization register cascade all others build on
//! - [`ToggleSync`] - single-cycle events, edge to toggle to edge
//! - [`VectorSync`] - narrow multi-bit levels with a change pulse
//! - [`ResetSync`] - reset re-timing with prompt assertion and delayed release
//!
//! Each crossing is split into a source half, clocked only from the source
//! domain's tick, and a destination half, clocked only from the destination
//! domain's tick. The destination reads the source register's committed
//! value; it never writes it.
//!
//! # Example
//!
//! ```ignore
//! use ph_rgmii_mac_fifo::cdc::ToggleSync;
//!
//! let mut underflow = ToggleSync::new(2)?;
//!
//! // tx domain tick
//! underflow.clock_source(1);
//!
//! // logic domain ticks
//! underflow.clock_sink();
//! let pulse = underflow.clock_sink() & 1 != 0;
//! ```

pub mod chain;
pub mod reset;
pub mod toggle;
pub mod vector;

pub use chain::SyncChain;
pub use reset::ResetSync;
pub use toggle::{ToggleSink, ToggleSource, ToggleSync};
pub use vector::{VectorSample, VectorSink, VectorSource, VectorSync};
