//! Shared output pipeline interface
//!
//! There is exactly one mixed output stream, shared by every participant.
//! The chain that composites and encodes it is out of scope here; the core
//! only forwards feedback to it and keeps it informed of how many
//! composition slots are live.

use crate::protocol::Ssrc;

/// The chain producing the single mixed/composited output stream.
pub trait OutputPipeline: Send + Sync {
    /// Feed one inbound feedback packet about the mixed stream.
    /// Returns the pipeline's wire-level result code.
    fn deliver_feedback(&self, data: &[u8]) -> i32;

    /// Notify the pipeline that the number of concurrently active
    /// composition slots changed.
    fn update_capacity(&self, active_slots: usize);

    /// Ask the encoder for an immediate keyframe.
    fn request_iframe(&self);

    /// Identifier of the mixed output stream.
    fn output_ssrc(&self) -> Ssrc;
}
