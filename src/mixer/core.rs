//! Mixer construction and participant lifecycle
//!
//! One control thread drives these operations in practice; nothing here
//! assumes it. Every mutation of the routing state funnels through the
//! registry's exclusive lock, and collaborator notifications (slot
//! activation, output capacity) happen after that lock is released, always
//! in activate-then-notify order.

use std::sync::Arc;

use crate::error::{MixerError, Result};
use crate::mixer::{MediaKind, MixerConfig};
use crate::pipeline::{
    AudioSync, CompositionBuffer, FeedbackSink, FrameSlotBuffer, MediaSink, OutputPipeline,
    PipelineFactory, TaskScheduler, TickScheduler, TransportAdapter,
};
use crate::protocol::Ssrc;
use crate::registry::{SlotIndex, SourceRegistry};
use crate::stats::{MetricsSnapshot, MixerMetrics};

/// Routing and resource-management core of one video mixing node.
///
/// Delivery methods are safe for arbitrarily many concurrent callers;
/// lifecycle methods serialize on the registry's exclusive lock.
pub struct VideoMixer {
    pub(super) registry: SourceRegistry,
    pub(super) buffer: Arc<dyn CompositionBuffer>,
    pub(super) scheduler: Arc<dyn TaskScheduler>,
    pub(super) output: Arc<dyn OutputPipeline>,
    pub(super) factory: Arc<dyn PipelineFactory>,
    pub(super) metrics: MixerMetrics,
}

impl VideoMixer {
    /// Create a mixer with the default composition buffer and scheduler.
    ///
    /// `outbound` is where the mixed output stream's packets go. The factory
    /// is asked for the shared output pipeline immediately, and the
    /// scheduler is started before the mixer accepts any traffic.
    pub fn new(
        config: MixerConfig,
        factory: Arc<dyn PipelineFactory>,
        outbound: Arc<dyn MediaSink>,
    ) -> Self {
        let buffer: Arc<dyn CompositionBuffer> = Arc::new(FrameSlotBuffer::new(config.max_slots));
        let scheduler: Arc<dyn TaskScheduler> = Arc::new(TickScheduler::new());
        Self::with_collaborators(config, factory, outbound, buffer, scheduler)
    }

    /// Create a mixer around caller-supplied buffer and scheduler
    /// collaborators. The buffer's `max_slots` is the participant capacity.
    pub fn with_collaborators(
        config: MixerConfig,
        factory: Arc<dyn PipelineFactory>,
        outbound: Arc<dyn MediaSink>,
        buffer: Arc<dyn CompositionBuffer>,
        scheduler: Arc<dyn TaskScheduler>,
    ) -> Self {
        let output = factory.create_output(
            config.output_ssrc,
            TransportAdapter::outbound(outbound),
            Arc::clone(&buffer),
            Arc::clone(&scheduler),
        );
        scheduler.start();

        tracing::info!(
            max_slots = buffer.max_slots(),
            output_ssrc = config.output_ssrc,
            "video mixer up"
        );

        Self {
            registry: SourceRegistry::new(buffer.max_slots()),
            buffer,
            scheduler,
            output,
            factory,
            metrics: MixerMetrics::new(),
        }
    }

    /// Attach a new source to the mixer.
    ///
    /// Assigns the lowest free composition slot, builds the participant's
    /// pipeline (wired to its feedback transport, the shared output pipeline
    /// and the shared scheduler) and publishes it to the delivery path, all
    /// in one exclusive critical section. Afterwards the slot is activated
    /// in the composition buffer and the output pipeline learns the new
    /// participant count.
    pub fn add_source(
        &self,
        id: Ssrc,
        kind: MediaKind,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Result<SlotIndex> {
        if self.registry.occupied_count() == self.registry.capacity() {
            tracing::warn!(
                ssrc = id,
                max_slots = self.registry.capacity(),
                "at capacity, ignoring add_source"
            );
            return Err(MixerError::CapacityExceeded {
                max_slots: self.registry.capacity(),
            });
        }
        if kind != MediaKind::Video {
            return Err(MixerError::UnsupportedMedia(kind));
        }

        let slot = self.registry.register(id, |slot| {
            self.factory.create_source(
                slot,
                TransportAdapter::feedback_only(feedback),
                Arc::clone(&self.output),
                Arc::clone(&self.scheduler),
            )
        })?;

        self.buffer.set_active(slot, true);
        let participants = self.registry.occupied_count();
        self.output.update_capacity(participants);

        tracing::info!(ssrc = id, slot, participants, "source added");
        Ok(slot)
    }

    /// Detach a source, freeing its slot and tearing down its pipeline.
    ///
    /// Removing an id that is not registered is a no-op: during churn a
    /// leave can race an earlier failed join.
    pub fn remove_source(&self, id: Ssrc, kind: MediaKind) -> Result<()> {
        if kind != MediaKind::Video {
            return Err(MixerError::UnsupportedMedia(kind));
        }

        let Some(removed) = self.registry.remove(id) else {
            tracing::debug!(ssrc = id, "remove_source for unknown id, ignoring");
            return Ok(());
        };

        self.buffer.set_active(removed.slot, false);
        let participants = self.registry.occupied_count();
        self.output.update_capacity(participants);

        tracing::info!(ssrc = id, slot = removed.slot, participants, "source removed");
        // Pipeline handle drops here, outside the exclusive section
        Ok(())
    }

    /// Bind a participant's voice channel to its video pipeline for
    /// audio/video sync.
    pub fn bind_audio(&self, id: Ssrc, voice_channel: i32, sync: Arc<dyn AudioSync>) -> Result<()> {
        self.registry
            .with_source(id, |entry| entry.pipeline().bind_audio_sync(voice_channel, sync))
            .ok_or(MixerError::UnknownSource(id))
    }

    /// Tear down every source and return the mixer to its idle state.
    ///
    /// Stops the shared scheduler, drains registry and slots in one
    /// exclusive section, deactivates every freed slot and reports zero
    /// capacity to the output pipeline. Safe to call repeatedly.
    pub fn close_all(&self) {
        self.scheduler.stop();

        let removed = self.registry.drain();
        for source in &removed {
            self.buffer.set_active(source.slot, false);
        }
        self.output.update_capacity(0);

        tracing::info!(sources = removed.len(), "closed all media in this mixer");
        // Pipelines drop here, after the exclusive section
    }

    /// Ask the output encoder for an immediate keyframe
    pub fn request_iframe(&self) {
        tracing::debug!("iframe requested");
        self.output.request_iframe();
    }

    /// Identifier of the mixed output stream
    pub fn send_ssrc(&self) -> Ssrc {
        self.output.output_ssrc()
    }

    /// Number of currently active participants
    pub fn participant_count(&self) -> usize {
        self.registry.occupied_count()
    }

    /// Total number of composition slots
    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// Current delivery counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Drop for VideoMixer {
    fn drop(&mut self) {
        self.close_all();
    }
}
