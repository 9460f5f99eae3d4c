//! Source registry implementation
//!
//! The single source of truth for "who is currently active". One
//! reader-writer lock guards the source map, the slot table and (through the
//! slot table) the participant counter, so every mutation updates all three
//! in one exclusive critical section and concurrent readers observe either
//! the pre- or post-mutation state, never a torn one.
//!
//! The check-then-insert path takes an upgradable read lock to test for a
//! duplicate id, and upgrades to exclusive only when the insert will
//! actually happen — the common "already present" probe never blocks the
//! delivery path's shared readers.

use std::collections::HashMap;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::error::{MixerError, Result};
use crate::pipeline::SourcePipeline;
use crate::protocol::Ssrc;
use crate::registry::entry::SourceEntry;
use crate::registry::slots::{SlotIndex, SlotTable};

struct RegistryState {
    sources: HashMap<Ssrc, SourceEntry>,
    slots: SlotTable,
}

/// Concurrent map from source id to its registry entry, joined at the hip
/// with the composition-slot table
pub struct SourceRegistry {
    state: RwLock<RegistryState>,
}

/// What `remove`/`drain` hand back: everything needed to finish teardown
/// after the exclusive section has been released
pub struct RemovedSource {
    /// Id the source was registered under
    pub id: Ssrc,
    /// Slot the source occupied; free again by the time this is returned
    pub slot: SlotIndex,
    /// The pipeline handle, now exclusively the caller's to drop
    pub pipeline: Box<dyn SourcePipeline>,
}

impl SourceRegistry {
    /// Create a registry with `capacity` composition slots
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                sources: HashMap::with_capacity(capacity),
                slots: SlotTable::new(capacity),
            }),
        }
    }

    /// Run `f` against the entry for `id` under the shared lock.
    ///
    /// Safe for unbounded concurrent callers; returns `None` if the id is
    /// not registered.
    pub fn with_source<R>(&self, id: Ssrc, f: impl FnOnce(&SourceEntry) -> R) -> Option<R> {
        let state = self.state.read();
        state.sources.get(&id).map(f)
    }

    /// Register a new source, assigning it the lowest free slot.
    ///
    /// The duplicate check, slot assignment, pipeline construction via
    /// `build` and map insert all happen inside one critical section;
    /// two callers racing on the same id cannot both succeed.
    pub fn register(
        &self,
        id: Ssrc,
        build: impl FnOnce(SlotIndex) -> Box<dyn SourcePipeline>,
    ) -> Result<SlotIndex> {
        let state = self.state.upgradable_read();
        if state.sources.contains_key(&id) {
            return Err(MixerError::DuplicateSource(id));
        }
        if state.slots.is_full() {
            return Err(MixerError::CapacityExceeded {
                max_slots: state.slots.capacity(),
            });
        }

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        let slot = state.slots.assign(id)?;
        let entry = SourceEntry::new(slot, build(slot));
        state.sources.insert(id, entry);
        Ok(slot)
    }

    /// Remove a source, freeing its slot in the same exclusive section.
    ///
    /// Returns `None` if the id is not registered.
    pub fn remove(&self, id: Ssrc) -> Option<RemovedSource> {
        let mut state = self.state.write();
        let entry = state.sources.remove(&id)?;
        let slot = match state.slots.release(id) {
            Ok(slot) => slot,
            Err(_) => {
                // Registered source without a slot: the bijection invariant
                // was already broken. Recover with the entry's own record.
                tracing::error!(ssrc = id, slot = entry.slot, "source had no slot at removal");
                entry.slot
            }
        };
        Some(RemovedSource {
            id,
            slot,
            pipeline: entry.into_pipeline(),
        })
    }

    /// Remove every source, emptying map and slots in one exclusive section
    pub fn drain(&self) -> Vec<RemovedSource> {
        let mut state = self.state.write();
        let removed = state
            .sources
            .drain()
            .map(|(id, entry)| RemovedSource {
                id,
                slot: entry.slot,
                pipeline: entry.into_pipeline(),
            })
            .collect();
        state.slots.clear();
        removed
    }

    /// Whether `id` is currently registered
    pub fn contains(&self, id: Ssrc) -> bool {
        self.state.read().sources.contains_key(&id)
    }

    /// Number of active sources (== occupied slots)
    pub fn occupied_count(&self) -> usize {
        self.state.read().slots.occupied_count()
    }

    /// Total number of composition slots
    pub fn capacity(&self) -> usize {
        self.state.read().slots.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().sources.is_empty()
    }

    /// Check the registry/slot bijection; true when every source occupies
    /// exactly one slot and no slot is orphaned
    #[cfg(test)]
    pub(crate) fn bijection_holds(&self) -> bool {
        let state = self.state.read();
        let mut occupants = state.slots.occupant_ids();
        occupants.sort_unstable();
        let mut keys: Vec<Ssrc> = state.sources.keys().copied().collect();
        keys.sort_unstable();
        occupants == keys && state.slots.occupied_count() == state.sources.len()
    }
}
