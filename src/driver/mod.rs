//! Front-end orchestration and its configuration.
//!
//! This module contains the pieces that assemble the synchronizers and queues
//! into a MAC front-end:
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`status`] - Per-cycle status pulses
//! - [`frontend`] - The three-domain front-end
//!
//! # Example
//!
//! ```ignore
//! use ph_rgmii_mac_fifo::driver::{FrontEndConfig, MacFrontEnd, QueueConfig, RxQueueMode};
//!
//! let config = FrontEndConfig::new()
//!     .with_rx_queue(QueueConfig::rx_default().with_output_pipeline(3))
//!     .with_rx_queue_mode(RxQueueMode::Internal);
//!
//! let front = MacFrontEnd::<_, 4096, 4096, 8>::new(mac, config)?;
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod frontend;
pub mod status;

// Re-exports for convenience
pub use config::{FrontEndConfig, QueueConfig, RxQueueMode};
pub use error::{ConfigError, ConfigResult, Error, Result, StreamError, StreamResult};
pub use frontend::{
    LogicInputs, LogicOutputs, MacFrontEnd, MacFrontEndDefault, MacFrontEndSmall, RxOutputs,
    TxOutputs,
};
pub use status::{LogicStatus, QueueStatus};
