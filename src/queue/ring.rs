//! Byte ring backing a framed queue.
//!
//! The elastic storage primitive: a fixed array of byte slots addressed by
//! free-running 32-bit pointers. The slot index is the pointer modulo the
//! depth; occupancy is the wrapping difference of two pointers.

/// One stored byte with its frame markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    /// Data byte
    pub data: u8,
    /// Last byte of a frame
    pub last: bool,
    /// Error flag of the frame, valid with `last`
    pub user: bool,
}

/// Circular byte storage of `DEPTH` slots.
pub struct ByteRing<const DEPTH: usize> {
    slots: [Slot; DEPTH],
}

impl<const DEPTH: usize> ByteRing<DEPTH> {
    /// Create an empty ring
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [Slot {
                data: 0,
                last: false,
                user: false,
            }; DEPTH],
        }
    }

    /// Number of slots
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        DEPTH
    }

    /// Slot addressed by a free-running pointer
    #[inline(always)]
    pub fn get(&self, ptr: u32) -> &Slot {
        &self.slots[ptr as usize % DEPTH]
    }

    /// Mutable slot addressed by a free-running pointer
    #[inline(always)]
    pub fn get_mut(&mut self, ptr: u32) -> &mut Slot {
        &mut self.slots[ptr as usize % DEPTH]
    }

    /// Store a slot
    #[inline(always)]
    pub fn write(&mut self, ptr: u32, slot: Slot) {
        *self.get_mut(ptr) = slot;
    }
}

impl<const DEPTH: usize> Default for ByteRing<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DEPTH: usize> core::fmt::Debug for ByteRing<DEPTH> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByteRing").field("capacity", &DEPTH).finish()
    }
}

/// Bytes between a read pointer and a write pointer.
#[inline(always)]
pub const fn occupancy(wr: u32, rd: u32) -> usize {
    wr.wrapping_sub(rd) as usize
}
