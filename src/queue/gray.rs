//! Gray-code conversion for queue pointers.
//!
//! Successive Gray values differ in one bit, so a pointer that advances by
//! one between two destination samples can never be captured as a value it
//! never held. Larger steps rely on the chain registering the whole word at
//! once; see the adapter's pointer notes.

/// Binary to Gray
#[inline(always)]
pub const fn bin_to_gray(bin: u32) -> u32 {
    bin ^ (bin >> 1)
}

/// Gray to binary
#[inline]
pub const fn gray_to_bin(gray: u32) -> u32 {
    let mut bin = gray;
    let mut shift = 1;
    while shift < 32 {
        bin ^= bin >> shift;
        shift <<= 1;
    }
    bin
}
