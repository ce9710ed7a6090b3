//! Shared front-end wrapper using critical sections.
//!
//! Provides [`SharedFrontEnd`] so that each clock domain can be driven from
//! its own task, thread or interrupt handler.

use super::primitives::CriticalSectionCell;
use crate::driver::frontend::{LogicInputs, LogicOutputs, MacFrontEnd, RxOutputs, TxOutputs};
use crate::phy::MacCore;

/// Critical-section protected front-end.
///
/// Every tick runs inside `critical_section::with()`, so ticks of different
/// domains never overlap; their interleaving is whatever order the callers
/// reach the lock in. Each domain task must still tick only its own domain.
///
/// # Example
///
/// ```ignore
/// let shared = SharedFrontEnd::new(MacFrontEnd::<_, 4096, 4096, 8>::new(mac, config)?);
///
/// // tx clock task
/// shared.tick_tx(false);
///
/// // logic clock task
/// let out = shared.tick_logic(LogicInputs::default());
/// ```
pub struct SharedFrontEnd<M: MacCore, const TX_DEPTH: usize, const RX_DEPTH: usize, const W: usize>
{
    inner: CriticalSectionCell<MacFrontEnd<M, TX_DEPTH, RX_DEPTH, W>>,
}

impl<M: MacCore, const TX_DEPTH: usize, const RX_DEPTH: usize, const W: usize>
    SharedFrontEnd<M, TX_DEPTH, RX_DEPTH, W>
{
    /// Wrap a front-end (const, suitable for static initialization).
    pub const fn new(front_end: MacFrontEnd<M, TX_DEPTH, RX_DEPTH, W>) -> Self {
        Self {
            inner: CriticalSectionCell::new(front_end),
        }
    }

    /// Execute a closure with exclusive access to the front-end.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut MacFrontEnd<M, TX_DEPTH, RX_DEPTH, W>) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut MacFrontEnd<M, TX_DEPTH, RX_DEPTH, W>) -> R,
    {
        self.inner.try_with(f)
    }

    /// One transmit clock edge
    pub fn tick_tx(&self, rst: bool) -> TxOutputs {
        self.with(|front| front.tick_tx(rst))
    }

    /// One receive clock edge
    pub fn tick_rx(&self, rst: bool) -> RxOutputs {
        self.with(|front| front.tick_rx(rst))
    }

    /// One logic clock edge
    pub fn tick_logic(&self, inputs: LogicInputs<W>) -> LogicOutputs<W> {
        self.with(|front| front.tick_logic(inputs))
    }

    /// Whether a transmit word offered now would be accepted
    pub fn tx_ready(&self) -> bool {
        self.with(|front| front.tx_ready())
    }

    /// Unwrap the front-end
    pub fn into_inner(self) -> MacFrontEnd<M, TX_DEPTH, RX_DEPTH, W> {
        self.inner.into_inner()
    }
}
