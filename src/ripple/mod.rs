//! Ripple history: a fixed-capacity circular store of loudness samples.
//!
//! The write pointer advances once per captured audio frame, the read pointer
//! once per rendered frame. Reads take any signed offset relative to the read
//! pointer and wrap modulo capacity, so no offset is ever out of range.

mod buffer;
mod shared;

// Re-export public types
pub use buffer::RippleBuffer;
pub use shared::{ripple_channel, RippleReader, RippleWriter};

/// Read side of a ripple history, as seen by the spatial mapper
pub trait RippleHistory {
    /// Number of slots
    fn capacity(&self) -> usize;

    /// Value at `read_pointer + offset`, wrapped into `[0, capacity)`
    fn read(&self, offset: i64) -> f32;

    /// Advance the read pointer by one slot (once per rendered frame)
    fn advance_read_pointer(&mut self);
}

/// Slot addressed by `offset` relative to `read_pointer`
///
/// Reduces the offset before adding so that offsets near `i64::MIN`/`MAX`
/// cannot overflow.
#[inline]
pub(crate) fn slot_index(read_pointer: usize, offset: i64, capacity: usize) -> usize {
    let cap = capacity as i64;
    let reduced = offset.rem_euclid(cap) as usize;
    (read_pointer + reduced) % capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index_wraps_negative_offsets() {
        assert_eq!(slot_index(0, -1, 8), 7);
        assert_eq!(slot_index(0, -8, 8), 0);
        assert_eq!(slot_index(3, -5, 8), 6);
        assert_eq!(slot_index(7, 1, 8), 0);
    }

    #[test]
    fn test_slot_index_extreme_offsets() {
        assert!(slot_index(5, i64::MIN, 200) < 200);
        assert!(slot_index(5, i64::MAX, 200) < 200);
        assert_eq!(slot_index(0, 0, 1), 0);
        assert_eq!(slot_index(0, -12345, 1), 0);
    }
}
