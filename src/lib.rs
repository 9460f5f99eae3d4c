//! # mixer-rs
//!
//! Routing and resource-management core of a multi-party real-time video
//! mixing node. Inbound media-channel packets are classified by their
//! synchronization source (SSRC) and forwarded to that participant's
//! processing pipeline; participants occupy composition slots from a
//! bounded pool; the registry that ties it together is safely mutable
//! while packets flow through it.
//!
//! # Architecture
//!
//! ```text
//!  receive threads          control thread
//!        │                        │
//!        ▼                        ▼
//!  deliver_media ─────►  add_source / remove_source / close_all
//!  deliver_feedback            │
//!        │            ┌────────┴─────────┐
//!        │            │  SourceRegistry  │  one RwLock over
//!        │            │   + SlotTable    │  map + slots + counter
//!        │            └────────┬─────────┘
//!        │       per-ssrc      │ slot events
//!        ▼                     ▼
//!  SourcePipeline (×N)   CompositionBuffer / TaskScheduler
//!        │
//!        ▼
//!  OutputPipeline ──► TransportAdapter ──► network
//! ```
//!
//! The media work itself — decode, synchronization, composition, encode —
//! happens in pipelines this crate treats as opaque collaborators behind
//! the traits in [`pipeline`]. Audio mixing is out of scope; a distinct
//! mixer instance handles it in the larger system.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mixer_rs::pipeline::{ChannelSink, PipelineFactory};
//! use mixer_rs::{MediaKind, MixerConfig, VideoMixer};
//!
//! fn run(factory: Arc<dyn PipelineFactory>, feedback: Arc<ChannelSink>) {
//!     let (outbound, _mixed_rx) = ChannelSink::new();
//!     let mixer = VideoMixer::new(MixerConfig::default(), factory, Arc::new(outbound));
//!
//!     mixer.add_source(0x1234, MediaKind::Video, feedback).unwrap();
//!     // receive loop:
//!     // mixer.deliver_media(&packet);
//! }
//! ```

pub mod error;
pub mod mixer;
pub mod pipeline;
pub mod protocol;
pub mod registry;
pub mod stats;

pub use error::{MixerError, Result};
pub use mixer::{MediaKind, MixerConfig, VideoMixer};
pub use protocol::{PacketClass, Ssrc};
pub use registry::{SlotIndex, SourceRegistry};
pub use stats::MetricsSnapshot;
