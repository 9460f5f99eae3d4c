//! Per-source pipeline interface
//!
//! Each active participant owns one processing chain (jitter handling,
//! decode, render-surface sync). The mixer core treats it as an opaque
//! collaborator: packets go in, a wire-level result code comes out.

use std::sync::Arc;

/// Voice-engine synchronization surface handed to a pipeline when the
/// participant's audio and video need lip sync. The audio side of the larger
/// system owns the clock; the video pipeline only queries it.
pub trait AudioSync: Send + Sync {
    /// Current playout delay of the given voice channel, in milliseconds,
    /// or `None` if the channel is not playing out yet.
    fn playout_delay_ms(&self, voice_channel: i32) -> Option<u32>;
}

/// One participant's processing chain.
///
/// Implementations must tolerate `deliver_media` racing with teardown: the
/// mixer may forward a final packet to a pipeline that is about to be
/// dropped.
pub trait SourcePipeline: Send + Sync {
    /// Feed one inbound media-channel packet (RTP or sender report),
    /// unmodified. Returns the pipeline's wire-level result code.
    fn deliver_media(&self, data: &[u8]) -> i32;

    /// Attach the participant's voice channel for audio/video sync.
    fn bind_audio_sync(&self, voice_channel: i32, sync: Arc<dyn AudioSync>);
}
