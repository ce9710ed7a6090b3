//! Framed byte queues between clock domains.
//!
//! - [`stream`] - the [`Beat`] stream word
//! - [`ring`] - byte storage addressed by free-running pointers
//! - [`gray`] - pointer encoding for crossing
//! - [`adapter`] - [`FramedQueueAdapter`], the dual-domain queue with width
//!   conversion and frame-level drop policies
//!
//! # Example
//!
//! ```ignore
//! use ph_rgmii_mac_fifo::queue::{Beat, FramedQueueAdapter};
//! use ph_rgmii_mac_fifo::QueueConfig;
//!
//! // 64-bit words in, bytes out, 4 KiB deep
//! let mut queue = FramedQueueAdapter::<4096, 8, 1>::new(QueueConfig::tx_default())?;
//!
//! // producer domain
//! let word = Beat::from_slice(&payload[..8], false)?;
//! let accepted = queue.clock_producer(false, Some(&word)).accepted;
//!
//! // consumer domain
//! if let Some(byte) = queue.clock_consumer(false, true).beat {
//!     // ...
//! }
//! ```

pub mod adapter;
pub mod gray;
pub mod ring;
pub mod stream;

pub use adapter::{FramedQueueAdapter, ReadResult, WriteResult};
pub use ring::{ByteRing, Slot};
pub use stream::Beat;
