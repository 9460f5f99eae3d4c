//! Composition-buffer slot activation
//!
//! The frame buffer that the composition loop reads from tracks which slots
//! currently have a live producer. The mixer core flips those flags as
//! participants join and leave; everything else about the buffer (frame
//! storage, busy/free exchange) belongs to the composition side.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::registry::SlotIndex;

/// Slot-activation surface of the composition frame buffer
pub trait CompositionBuffer: Send + Sync {
    /// Number of composition slots in this deployment; fixed for the
    /// buffer's lifetime.
    fn max_slots(&self) -> usize;

    /// Mark a slot as having (or no longer having) a live producer
    fn set_active(&self, slot: SlotIndex, active: bool);

    /// Whether a slot currently has a live producer
    fn is_active(&self, slot: SlotIndex) -> bool;
}

/// Default in-process buffer state: one activation flag per slot
pub struct FrameSlotBuffer {
    active: Vec<AtomicBool>,
}

impl FrameSlotBuffer {
    pub fn new(max_slots: usize) -> Self {
        Self {
            active: (0..max_slots).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    /// Number of currently active slots
    pub fn active_count(&self) -> usize {
        self.active
            .iter()
            .filter(|flag| flag.load(Ordering::Relaxed))
            .count()
    }
}

impl CompositionBuffer for FrameSlotBuffer {
    fn max_slots(&self) -> usize {
        self.active.len()
    }

    fn set_active(&self, slot: SlotIndex, active: bool) {
        match self.active.get(slot) {
            Some(flag) => flag.store(active, Ordering::Release),
            None => {
                tracing::error!(slot, max_slots = self.active.len(), "slot index out of range");
            }
        }
    }

    fn is_active(&self, slot: SlotIndex) -> bool {
        self.active
            .get(slot)
            .map(|flag| flag.load(Ordering::Acquire))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_flags() {
        let buffer = FrameSlotBuffer::new(4);
        assert_eq!(buffer.max_slots(), 4);
        assert_eq!(buffer.active_count(), 0);

        buffer.set_active(0, true);
        buffer.set_active(2, true);

        assert!(buffer.is_active(0));
        assert!(!buffer.is_active(1));
        assert!(buffer.is_active(2));
        assert_eq!(buffer.active_count(), 2);

        buffer.set_active(0, false);
        assert!(!buffer.is_active(0));
        assert_eq!(buffer.active_count(), 1);
    }

    #[test]
    fn test_out_of_range_slot_ignored() {
        let buffer = FrameSlotBuffer::new(2);

        buffer.set_active(5, true);
        assert!(!buffer.is_active(5));
        assert_eq!(buffer.active_count(), 0);
    }
}
