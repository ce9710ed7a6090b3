//! RGMII MAC Front-End
//!
//! A `no_std`, `no_alloc` cycle-level model of the clock-domain-crossing
//! front-end that sits between a byte-wide Ethernet MAC and wide user logic.
//!
//! Three independently clocked and reset domains meet here: the MAC transmit
//! clock, the MAC receive clock and the user logic clock. Every value that
//! moves between them goes through a synchronizer or a dual-clock queue.
//!
//! # Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Crossing Layer** ([`cdc`]): resynchronization chains, toggle event
//!    synchronizers, vector-on-change synchronizers, reset synchronizers
//! 2. **Queue Layer** ([`queue`]): framed dual-domain queues with width
//!    conversion, frame-atomic commit and drop policies
//! 3. **Front-End Layer** ([`driver`]): the orchestrator wiring a [`MacCore`]
//!    to the user logic, its configuration and status
//! 4. **Harness** ([`sim`]): a multi-clock edge scheduler to drive it
//!
//! The physical MAC itself (line coding, checksum, DDR I/O) is outside this
//! crate and plugs in through [`MacCore`].
//!
//! # Cycle Model
//!
//! Each `clock`/`tick` call is one rising edge of one domain. State computed
//! at an edge is what the next edge of any domain observes. Coincident edges
//! are evaluated in scheduler order, which is how a metastable sample that
//! settles either way is modelled.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and event logging
//! - `critical-section`: Enable the [`sync::SharedFrontEnd`] wrapper for
//!   ticking each domain from its own task
//!
//! # Example
//!
//! ```ignore
//! use ph_rgmii_mac_fifo::{ClockSchedule, ClockSpec, Domain, FrontEndConfig, LogicInputs, MacFrontEnd};
//!
//! let mut front = MacFrontEnd::<_, 4096, 4096, 8>::new(my_mac, FrontEndConfig::new())?;
//! let mut sched = ClockSchedule::front_end(
//!     ClockSpec::new(8_000),                  // 125 MHz tx
//!     ClockSpec::new(8_000).with_phase(2_000), // 125 MHz rx
//!     ClockSpec::new(4_000),                  // 250 MHz logic
//! )?;
//!
//! loop {
//!     let edges = sched.advance();
//!     if edges.has(Domain::Tx) {
//!         front.tick_tx(false);
//!     }
//!     if edges.has(Domain::Rx) {
//!         front.tick_rx(false);
//!     }
//!     if edges.has(Domain::Logic) {
//!         let out = front.tick_logic(LogicInputs::default());
//!         if out.status.has_error() {
//!             // count it
//!         }
//!     }
//! }
//! ```
//!
//! # Memory Requirements
//!
//! Queue storage is inline: three bytes per slot of depth. The default
//! front-end with two 4 KiB queues needs about 24 KiB.

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; Cargo.toml mirrors them for workspace tooling.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod cdc;
pub mod driver;
pub mod phy;
pub mod queue;
pub mod sim;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use cdc::{ResetSync, SyncChain, ToggleSync, VectorSync};
pub use driver::config::{FrontEndConfig, QueueConfig, RxQueueMode};
pub use driver::error::{
    ConfigError, ConfigResult, Error, Result, StreamError, StreamResult,
};
pub use driver::frontend::{
    LogicInputs, LogicOutputs, MacFrontEnd, MacFrontEndDefault, MacFrontEndSmall, RxOutputs,
    TxOutputs,
};
pub use driver::status::{LogicStatus, QueueStatus};
pub use queue::{Beat, FramedQueueAdapter};
pub use sim::{ClockSchedule, ClockSpec, Domain, Edges};

// Re-export MAC collaborator types
pub use phy::{MacCore, PhyBeat, RxEvents, Speed, TxEvents};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{CriticalSectionCell, SharedFrontEnd};

/// Shared constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on front-end types.
pub mod constants {
    pub use crate::internal::constants::{
        // Stream geometry
        DEFAULT_OUTPUT_PIPELINE,
        DEFAULT_QUEUE_DEPTH,
        DEFAULT_WORD_BYTES,
        // Synchronizers
        DEFAULT_RESET_STAGES,
        DEFAULT_SYNC_STAGES,
        // MAC defaults
        DEFAULT_IFG_DELAY,
        // Limits and encodings
        MAX_OUTPUT_PIPELINE,
        MAX_SYNC_STAGES,
        MAX_WORD_BYTES,
        MIN_SYNC_STAGES,
        PHY_WORD_BYTES,
        SPEED_BITS_1G,
        SPEED_BITS_10M,
        SPEED_BITS_100M,
        SPEED_MASK,
    };
}
