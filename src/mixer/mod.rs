//! The mixing-node facade
//!
//! [`VideoMixer`] ties the routing core together: packet delivery paths in
//! `dispatch`, participant lifecycle in `core`, tunables in `config`.

pub mod config;
pub mod core;
pub mod dispatch;

pub use self::config::{MixerConfig, DEFAULT_MAX_SLOTS, DEFAULT_OUTPUT_SSRC};
pub use self::core::VideoMixer;

/// Modality of a media source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Video; the only modality this mixer handles
    Video,
    /// Audio; handled by a separate mixer instance in the larger system
    Audio,
}

#[cfg(test)]
pub(crate) mod testing {
    //! Instrumented fake collaborators shared by the lifecycle and
    //! dispatch tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::pipeline::{
        AudioSync, CompositionBuffer, FeedbackSink, MediaSink, OutputPipeline, PipelineFactory,
        SourcePipeline, TaskScheduler, TransportAdapter,
    };
    use crate::protocol::Ssrc;
    use crate::registry::SlotIndex;

    pub struct FakeSourcePipeline {
        pub delivered: Arc<AtomicU64>,
        pub bound_channel: Arc<Mutex<Option<i32>>>,
    }

    impl SourcePipeline for FakeSourcePipeline {
        fn deliver_media(&self, data: &[u8]) -> i32 {
            self.delivered.fetch_add(1, Ordering::Relaxed);
            data.len() as i32
        }

        fn bind_audio_sync(&self, voice_channel: i32, _sync: Arc<dyn AudioSync>) {
            *self.bound_channel.lock() = Some(voice_channel);
        }
    }

    #[derive(Default)]
    pub struct FakeOutput {
        pub ssrc: Ssrc,
        pub feedback_packets: AtomicU64,
        pub iframe_requests: AtomicU64,
        pub capacity_updates: Mutex<Vec<usize>>,
    }

    impl OutputPipeline for FakeOutput {
        fn deliver_feedback(&self, data: &[u8]) -> i32 {
            self.feedback_packets.fetch_add(1, Ordering::Relaxed);
            data.len() as i32
        }

        fn update_capacity(&self, active_slots: usize) {
            self.capacity_updates.lock().push(active_slots);
        }

        fn request_iframe(&self) {
            self.iframe_requests.fetch_add(1, Ordering::Relaxed);
        }

        fn output_ssrc(&self) -> Ssrc {
            self.ssrc
        }
    }

    #[derive(Default)]
    pub struct FakeScheduler {
        pub starts: AtomicU64,
        pub stops: AtomicU64,
    }

    impl TaskScheduler for FakeScheduler {
        fn start(&self) {
            self.starts.fetch_add(1, Ordering::Relaxed);
        }

        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Factory producing counting pipelines and recording which slots got
    /// them, so tests can follow a packet to a specific participant.
    #[derive(Default)]
    pub struct FakeFactory {
        pub output: Mutex<Option<Arc<FakeOutput>>>,
        pub delivery_counters: Mutex<HashMap<SlotIndex, Arc<AtomicU64>>>,
        pub bound_channels: Mutex<HashMap<SlotIndex, Arc<Mutex<Option<i32>>>>>,
    }

    impl FakeFactory {
        pub fn delivered_to(&self, slot: SlotIndex) -> u64 {
            self.delivery_counters
                .lock()
                .get(&slot)
                .map(|c| c.load(Ordering::Relaxed))
                .unwrap_or(0)
        }

        pub fn bound_channel(&self, slot: SlotIndex) -> Option<i32> {
            self.bound_channels
                .lock()
                .get(&slot)
                .and_then(|channel| *channel.lock())
        }
    }

    impl PipelineFactory for FakeFactory {
        fn create_output(
            &self,
            output_ssrc: Ssrc,
            _transport: TransportAdapter,
            _buffer: Arc<dyn CompositionBuffer>,
            _scheduler: Arc<dyn TaskScheduler>,
        ) -> Arc<dyn OutputPipeline> {
            let output = Arc::new(FakeOutput {
                ssrc: output_ssrc,
                ..Default::default()
            });
            *self.output.lock() = Some(Arc::clone(&output));
            output
        }

        fn create_source(
            &self,
            slot: SlotIndex,
            _transport: TransportAdapter,
            _output: Arc<dyn OutputPipeline>,
            _scheduler: Arc<dyn TaskScheduler>,
        ) -> Box<dyn SourcePipeline> {
            let delivered = Arc::new(AtomicU64::new(0));
            let bound_channel = Arc::new(Mutex::new(None));
            self.delivery_counters
                .lock()
                .insert(slot, Arc::clone(&delivered));
            self.bound_channels
                .lock()
                .insert(slot, Arc::clone(&bound_channel));
            Box::new(FakeSourcePipeline {
                delivered,
                bound_channel,
            })
        }
    }

    #[derive(Default)]
    pub struct NullSink {
        pub media_packets: AtomicU64,
        pub feedback_packets: AtomicU64,
    }

    impl MediaSink for NullSink {
        fn on_media(&self, data: &[u8]) -> i32 {
            self.media_packets.fetch_add(1, Ordering::Relaxed);
            data.len() as i32
        }
    }

    impl FeedbackSink for NullSink {
        fn on_feedback(&self, data: &[u8]) -> i32 {
            self.feedback_packets.fetch_add(1, Ordering::Relaxed);
            data.len() as i32
        }
    }

    pub struct FixedDelaySync(pub u32);

    impl AudioSync for FixedDelaySync {
        fn playout_delay_ms(&self, _voice_channel: i32) -> Option<u32> {
            Some(self.0)
        }
    }
}
