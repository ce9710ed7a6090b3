//! Synchronization and Concurrency Support
//!
//! Lets the three clock domains of a front-end run as separate tasks:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`], critical-section
//!   protected interior mutability
//! - **Shared Wrapper** (`shared`): [`SharedFrontEnd`], a front-end every
//!   domain task can tick through a shared reference
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module. The platform (a HAL crate, or
//!   `critical-section/std` on a host) provides the implementation.
//!
//! # Example
//!
//! ```ignore
//! use ph_rgmii_mac_fifo::sync::SharedFrontEnd;
//!
//! let shared = SharedFrontEnd::new(front_end);
//!
//! std::thread::scope(|s| {
//!     s.spawn(|| loop { shared.tick_tx(false); });
//!     s.spawn(|| loop { shared.tick_rx(false); });
//!     s.spawn(|| loop { shared.tick_logic(next_inputs()); });
//! });
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedFrontEnd;
