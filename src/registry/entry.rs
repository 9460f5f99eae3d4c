//! Registry entry for one active source
//!
//! The registry exclusively owns each participant's pipeline handle. Lookups
//! expose it by reference under the registry's read guard only, so nothing
//! outside the registry can keep the pipeline alive past removal.

use std::time::Instant;

use crate::pipeline::SourcePipeline;
use crate::registry::SlotIndex;

/// One active participant: its composition slot and its pipeline
pub struct SourceEntry {
    /// Composition slot this source occupies
    pub slot: SlotIndex,

    /// When the source was added
    pub joined_at: Instant,

    pipeline: Box<dyn SourcePipeline>,
}

impl SourceEntry {
    pub(super) fn new(slot: SlotIndex, pipeline: Box<dyn SourcePipeline>) -> Self {
        Self {
            slot,
            joined_at: Instant::now(),
            pipeline,
        }
    }

    /// Borrow the pipeline; only reachable under the registry's lock
    pub fn pipeline(&self) -> &dyn SourcePipeline {
        self.pipeline.as_ref()
    }

    pub(super) fn into_pipeline(self) -> Box<dyn SourcePipeline> {
        self.pipeline
    }
}

impl std::fmt::Debug for SourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEntry")
            .field("slot", &self.slot)
            .field("joined_at", &self.joined_at)
            .finish_non_exhaustive()
    }
}
