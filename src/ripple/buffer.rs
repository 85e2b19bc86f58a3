//! Single-threaded ripple history buffer.

use super::{slot_index, RippleHistory};
use crate::error::{Result, RippleError};

/// Circular loudness history with independent write and read pointers
#[derive(Debug, Clone)]
pub struct RippleBuffer {
    slots: Vec<f32>,
    write_pointer: usize,
    read_pointer: usize,
}

impl RippleBuffer {
    /// Create a buffer of `capacity` silent slots
    ///
    /// # Errors
    /// `RippleError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(RippleError::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: vec![0.0; capacity],
            write_pointer: 0,
            read_pointer: 0,
        })
    }

    /// Store `value` at the write pointer, then advance it
    pub fn write(&mut self, value: f32) {
        self.slots[self.write_pointer] = value;
        self.write_pointer = (self.write_pointer + 1) % self.slots.len();
    }

    pub fn write_pointer(&self) -> usize {
        self.write_pointer
    }

    pub fn read_pointer(&self) -> usize {
        self.read_pointer
    }

    /// Raw slot contents in slot order
    pub fn slots(&self) -> &[f32] {
        &self.slots
    }
}

impl RippleHistory for RippleBuffer {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn read(&self, offset: i64) -> f32 {
        self.slots[slot_index(self.read_pointer, offset, self.slots.len())]
    }

    fn advance_read_pointer(&mut self) {
        self.read_pointer = (self.read_pointer + 1) % self.slots.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RippleBuffer::new(0),
            Err(RippleError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_unwritten_buffer_reads_silence() {
        let buffer = RippleBuffer::new(16).unwrap();
        for offset in -40..40 {
            assert_eq!(buffer.read(offset), 0.0);
        }
    }

    #[test]
    fn test_wrapped_scenario() {
        let mut buffer = RippleBuffer::new(8).unwrap();
        for value in 1..=8 {
            buffer.write(value as f32);
        }

        assert_eq!(buffer.write_pointer(), 0);
        assert_eq!(buffer.read_pointer(), 0);
        assert_eq!(buffer.read(0), 1.0);
        assert_eq!(buffer.read(-1), 8.0);
        assert_eq!(buffer.read(-8), 1.0);
    }

    #[test]
    fn test_read_pointer_scrolls_history() {
        let mut buffer = RippleBuffer::new(4).unwrap();
        for value in [10.0, 20.0, 30.0, 40.0] {
            buffer.write(value);
        }

        assert_eq!(buffer.read(0), 10.0);
        buffer.advance_read_pointer();
        assert_eq!(buffer.read(0), 20.0);
        assert_eq!(buffer.read(-1), 10.0);
        assert_eq!(buffer.read(-2), 40.0);
    }

    #[test]
    fn test_capacity_one() {
        let mut buffer = RippleBuffer::new(1).unwrap();
        buffer.write(0.7);
        buffer.advance_read_pointer();
        assert_eq!(buffer.read(-3), 0.7);
        assert_eq!(buffer.write_pointer(), 0);
        assert_eq!(buffer.read_pointer(), 0);
    }

    proptest! {
        // After N writes, read(-k) relative to the write pointer returns the
        // value written k+1 steps ago (k = 0 is the most recent write).
        #[test]
        fn prop_recent_history(
            capacity in 1usize..64,
            values in prop::collection::vec(0.0f32..1.0, 1..256),
        ) {
            let mut buffer = RippleBuffer::new(capacity).unwrap();
            for &value in &values {
                buffer.write(value);
            }
            // Align the read pointer with the write pointer
            while buffer.read_pointer() != buffer.write_pointer() {
                buffer.advance_read_pointer();
            }

            let n = values.len();
            for k in 1..=capacity.min(n) {
                prop_assert_eq!(buffer.read(-(k as i64)), values[n - k]);
            }
        }

        #[test]
        fn prop_modular_read_never_faults(
            capacity in 1usize..300,
            advances in 0usize..600,
            offset in any::<i64>(),
        ) {
            let mut buffer = RippleBuffer::new(capacity).unwrap();
            for i in 0..capacity {
                buffer.write(i as f32);
            }
            for _ in 0..advances {
                buffer.advance_read_pointer();
            }

            let normalized = offset.rem_euclid(capacity as i64);
            prop_assert_eq!(buffer.read(offset), buffer.read(normalized));
        }

        #[test]
        fn prop_pointers_independent(
            capacity in 1usize..64,
            writes in 0usize..200,
            advances in 0usize..200,
        ) {
            let mut buffer = RippleBuffer::new(capacity).unwrap();

            for i in 0..writes {
                let read_before = buffer.read_pointer();
                buffer.write(i as f32);
                prop_assert_eq!(buffer.read_pointer(), read_before);
            }

            let slots_before = buffer.slots().to_vec();
            let write_before = buffer.write_pointer();
            for _ in 0..advances {
                buffer.advance_read_pointer();
            }
            prop_assert_eq!(buffer.slots(), &slots_before[..]);
            prop_assert_eq!(buffer.write_pointer(), write_before);
            prop_assert_eq!(buffer.read_pointer(), advances % capacity);
        }
    }
}
