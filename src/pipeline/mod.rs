//! Collaborator interfaces around the routing core
//!
//! The mixer core routes packets and manages slots; the actual media work
//! happens in pipelines it treats as opaque. This module is that boundary:
//! the per-source and output pipeline traits, the outbound transport
//! endpoints, the composition buffer's slot-activation surface, and the
//! shared background scheduler.
//!
//! ```text
//!                   ┌──────────────────────────────┐
//!   deliver_media ─►│          VideoMixer          │
//!                   │  ┌────────────────────────┐  │
//!                   │  │ SourceRegistry + slots │  │
//!                   │  └───────────┬────────────┘  │
//!                   └──────────────┼───────────────┘
//!             per ssrc             ▼
//!        ┌────────────────┐  ┌────────────────┐  ┌───────────────────┐
//!        │ SourcePipeline │─►│ OutputPipeline │─►│ TransportAdapter  │
//!        │ (one per slot) │  │   (shared)     │  │ (MediaSink side)  │
//!        └───────┬────────┘  └───────▲────────┘  └───────────────────┘
//!                │ CompositionBuffer │ TaskScheduler
//!                └───────────────────┘
//! ```
//!
//! A [`PipelineFactory`] supplied by the embedder constructs the concrete
//! pipelines; the core wires them to their transport, buffer and scheduler.

pub mod buffer;
pub mod output;
pub mod scheduler;
pub mod source;
pub mod transport;

pub use buffer::{CompositionBuffer, FrameSlotBuffer};
pub use output::OutputPipeline;
pub use scheduler::{TaskScheduler, TickScheduler};
pub use source::{AudioSync, SourcePipeline};
pub use transport::{ChannelSink, FeedbackSink, MediaSink, TransportAdapter};

use std::sync::Arc;

use crate::protocol::Ssrc;
use crate::registry::SlotIndex;

/// Constructs the concrete pipelines the core routes into.
pub trait PipelineFactory: Send + Sync {
    /// Build the single shared output pipeline. Called once, at mixer
    /// construction, before any source exists.
    fn create_output(
        &self,
        output_ssrc: Ssrc,
        transport: TransportAdapter,
        buffer: Arc<dyn CompositionBuffer>,
        scheduler: Arc<dyn TaskScheduler>,
    ) -> Arc<dyn OutputPipeline>;

    /// Build the pipeline for one participant occupying `slot`. Called
    /// inside the registration critical section; must not block.
    fn create_source(
        &self,
        slot: SlotIndex,
        transport: TransportAdapter,
        output: Arc<dyn OutputPipeline>,
        scheduler: Arc<dyn TaskScheduler>,
    ) -> Box<dyn SourcePipeline>;
}
