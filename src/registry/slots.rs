//! Fixed-capacity composition-slot table
//!
//! Each active participant occupies exactly one composition position in the
//! mixed output. Assignment is first-fit in increasing index order so the
//! downstream slot-activation bookkeeping sees stable, predictable indices:
//! the lowest freed slot is always the next one handed out.

use crate::error::{MixerError, Result};
use crate::protocol::Ssrc;

/// Index of one composition position, in `[0, capacity)`
pub type SlotIndex = usize;

/// Table mapping composition slots to their occupants
#[derive(Debug)]
pub struct SlotTable {
    slots: Vec<Option<Ssrc>>,
    occupied: usize,
}

impl SlotTable {
    /// Create a table with `capacity` empty slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            occupied: 0,
        }
    }

    /// Occupy the first empty slot with `id`, returning its index
    pub fn assign(&mut self, id: Ssrc) -> Result<SlotIndex> {
        match self.slots.iter().position(|slot| slot.is_none()) {
            Some(index) => {
                self.slots[index] = Some(id);
                self.occupied += 1;
                Ok(index)
            }
            None => Err(MixerError::CapacityExceeded {
                max_slots: self.slots.len(),
            }),
        }
    }

    /// Empty the slot occupied by `id`, returning its former index
    pub fn release(&mut self, id: Ssrc) -> Result<SlotIndex> {
        match self.slots.iter().position(|slot| *slot == Some(id)) {
            Some(index) => {
                self.slots[index] = None;
                self.occupied -= 1;
                Ok(index)
            }
            None => Err(MixerError::UnknownSource(id)),
        }
    }

    /// Slot currently occupied by `id`, if any
    pub fn slot_of(&self, id: Ssrc) -> Option<SlotIndex> {
        self.slots.iter().position(|slot| *slot == Some(id))
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.occupied = 0;
    }

    /// Ids of all occupants, in slot order
    pub fn occupant_ids(&self) -> Vec<Ssrc> {
        self.slots.iter().filter_map(|slot| *slot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fit_assignment() {
        let mut table = SlotTable::new(4);

        assert_eq!(table.assign(10).unwrap(), 0);
        assert_eq!(table.assign(20).unwrap(), 1);
        assert_eq!(table.assign(30).unwrap(), 2);
        assert_eq!(table.occupied_count(), 3);
    }

    #[test]
    fn test_release_and_reuse_lowest_index() {
        let mut table = SlotTable::new(4);
        table.assign(10).unwrap();
        table.assign(20).unwrap();
        table.assign(30).unwrap();

        assert_eq!(table.release(10).unwrap(), 0);
        assert_eq!(table.occupied_count(), 2);
        assert_eq!(table.slot_of(10), None);

        // Freed slot 0 is handed out before untouched slot 3
        assert_eq!(table.assign(40).unwrap(), 0);
        assert_eq!(table.slot_of(40), Some(0));
    }

    #[test]
    fn test_full_table_rejects() {
        let mut table = SlotTable::new(2);
        table.assign(1).unwrap();
        table.assign(2).unwrap();

        assert!(table.is_full());
        assert_eq!(
            table.assign(3).unwrap_err(),
            MixerError::CapacityExceeded { max_slots: 2 }
        );
        assert_eq!(table.occupied_count(), 2);
    }

    #[test]
    fn test_release_unknown_id() {
        let mut table = SlotTable::new(2);
        table.assign(1).unwrap();

        assert_eq!(table.release(9).unwrap_err(), MixerError::UnknownSource(9));
        assert_eq!(table.occupied_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut table = SlotTable::new(3);
        table.assign(1).unwrap();
        table.assign(2).unwrap();

        table.clear();
        assert_eq!(table.occupied_count(), 0);
        assert!(table.occupant_ids().is_empty());
        assert_eq!(table.assign(5).unwrap(), 0);
    }

    #[test]
    fn test_occupant_ids_in_slot_order() {
        let mut table = SlotTable::new(4);
        table.assign(10).unwrap();
        table.assign(20).unwrap();
        table.assign(30).unwrap();
        table.release(20).unwrap();

        assert_eq!(table.occupant_ids(), vec![10, 30]);
    }
}
