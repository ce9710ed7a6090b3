//! Physical MAC Collaborator
//!
//! The byte-level MAC (preamble, checksum, inter-frame gap, RGMII DDR I/O)
//! is outside this crate. This module defines the interface the front-end
//! drives it through.
//!
//! # Architecture
//!
//! The MAC sits on the far side of the clock-domain boundary:
//!
//! - transmit domain: consumes bytes from the transmit queue, reports underflow
//!   and the negotiated speed
//! - receive domain: produces bytes into the receive queue (or the external
//!   queue), reports bad frames and bad checksums
//!
//! Platform variants are different [`MacCore`] implementations chosen when
//! the front-end is constructed; nothing branches on the platform at run time.

pub mod generic;

pub use generic::{MacCore, PhyBeat, RxEvents, Speed, TxEvents};
