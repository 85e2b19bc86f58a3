//! Lock-free single-producer/single-consumer ripple history.
//!
//! The capture thread owns the [`RippleWriter`], the render loop owns the
//! [`RippleReader`]. Slots hold `f32` bit patterns in `AtomicU32`s; a slot
//! store is `Release` and a slot load `Acquire`, so a reader that observes a
//! value also observes everything the writer did before storing it.
//! Overwriting unread slots is the intended lossy behavior.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use super::{slot_index, RippleHistory};
use crate::error::{Result, RippleError};

struct SharedSlots {
    slots: Box<[AtomicU32]>,
    write_pointer: AtomicUsize,
}

/// Producer half (lives in the audio capture callback)
pub struct RippleWriter {
    shared: Arc<SharedSlots>,
}

/// Consumer half (lives in the render loop)
pub struct RippleReader {
    shared: Arc<SharedSlots>,
    read_pointer: usize,
}

/// Create a matched writer/reader pair over `capacity` silent slots
///
/// # Errors
/// `RippleError::InvalidCapacity` if `capacity` is zero.
pub fn ripple_channel(capacity: usize) -> Result<(RippleWriter, RippleReader)> {
    if capacity == 0 {
        return Err(RippleError::InvalidCapacity(capacity));
    }

    let slots = (0..capacity)
        .map(|_| AtomicU32::new(0.0_f32.to_bits()))
        .collect::<Vec<_>>()
        .into_boxed_slice();
    let shared = Arc::new(SharedSlots {
        slots,
        write_pointer: AtomicUsize::new(0),
    });

    Ok((
        RippleWriter {
            shared: Arc::clone(&shared),
        },
        RippleReader {
            shared,
            read_pointer: 0,
        },
    ))
}

impl RippleWriter {
    /// Store `value` at the write pointer, then advance it
    pub fn write(&mut self, value: f32) {
        let capacity = self.shared.slots.len();
        // Only this half ever stores the write pointer
        let index = self.shared.write_pointer.load(Ordering::Relaxed);
        self.shared.slots[index].store(value.to_bits(), Ordering::Release);
        self.shared
            .write_pointer
            .store((index + 1) % capacity, Ordering::Release);
    }

    pub fn write_pointer(&self) -> usize {
        self.shared.write_pointer.load(Ordering::Relaxed)
    }
}

impl RippleReader {
    pub fn read_pointer(&self) -> usize {
        self.read_pointer
    }

    /// Writer's current position, as last published
    pub fn write_pointer(&self) -> usize {
        self.shared.write_pointer.load(Ordering::Acquire)
    }
}

impl RippleHistory for RippleReader {
    fn capacity(&self) -> usize {
        self.shared.slots.len()
    }

    fn read(&self, offset: i64) -> f32 {
        let index = slot_index(self.read_pointer, offset, self.shared.slots.len());
        f32::from_bits(self.shared.slots[index].load(Ordering::Acquire))
    }

    fn advance_read_pointer(&mut self) {
        self.read_pointer = (self.read_pointer + 1) % self.shared.slots.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            ripple_channel(0),
            Err(RippleError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_matches_single_threaded_scenario() {
        let (mut writer, reader) = ripple_channel(8).unwrap();
        for value in 1..=8 {
            writer.write(value as f32);
        }

        assert_eq!(reader.write_pointer(), 0);
        assert_eq!(reader.read(0), 1.0);
        assert_eq!(reader.read(-1), 8.0);
        assert_eq!(reader.read(-8), 1.0);
    }

    #[test]
    fn test_pointer_independence() {
        let (mut writer, mut reader) = ripple_channel(5).unwrap();

        writer.write(1.0);
        writer.write(2.0);
        assert_eq!(reader.read_pointer(), 0);

        reader.advance_read_pointer();
        reader.advance_read_pointer();
        reader.advance_read_pointer();
        assert_eq!(writer.write_pointer(), 2);
        assert_eq!(reader.read_pointer(), 3);
        assert_eq!(reader.read(-3), 1.0);
        assert_eq!(reader.read(-2), 2.0);
    }

    #[test]
    fn test_writes_from_capture_thread_are_visible() {
        let (mut writer, reader) = ripple_channel(64).unwrap();

        let handle = thread::spawn(move || {
            for i in 0..64 {
                writer.write(i as f32 + 0.5);
            }
        });
        handle.join().unwrap();

        assert_eq!(reader.write_pointer(), 0);
        for i in 0..64 {
            assert_eq!(reader.read(i), i as f32 + 0.5);
        }
    }
}
