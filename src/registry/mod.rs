//! Source registry and composition-slot allocation
//!
//! The registry is the single source of truth for which participants are
//! active, and the slot table maps each of them to one composition position
//! in the mixed output. Both live behind one reader-writer lock:
//!
//! ```text
//!              SourceRegistry
//!       ┌───────────────────────────┐
//!       │ RwLock<                   │
//!       │   sources: HashMap<Ssrc,  │     delivery threads take the
//!       │     SourceEntry {         │ ◄── shared lock (with_source)
//!       │       slot, pipeline,     │
//!       │     }>,                   │     the control thread takes the
//!       │   slots: SlotTable,       │ ◄── exclusive lock (register /
//!       │ >                         │     remove / drain)
//!       └───────────────────────────┘
//! ```
//!
//! Invariant: occupied slots and registered ids are in bijection — every
//! active participant occupies exactly one slot, every occupied slot belongs
//! to exactly one active participant, and the occupancy counter equals both.

pub mod entry;
pub mod slots;
pub mod store;

pub use entry::SourceEntry;
pub use slots::{SlotIndex, SlotTable};
pub use store::{RemovedSource, SourceRegistry};
