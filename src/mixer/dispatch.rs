//! Packet delivery paths
//!
//! Network-receive threads call these continuously while the control thread
//! mutates the registry; the shared lock inside `SourceRegistry` is the only
//! coordination. A packet racing the removal of its source is either dropped
//! or delivered to a pipeline torn down right after; both outcomes are fine.

use crate::error::{MixerError, Result};
use crate::mixer::{MediaKind, VideoMixer};
use crate::protocol;

impl VideoMixer {
    /// Route one inbound media-channel packet to its source's pipeline.
    ///
    /// Returns the pipeline's result code, or 0 when the packet was dropped:
    /// an unrecognized source id is expected during join/leave churn, and a
    /// malformed or misrouted packet is discarded rather than failing the
    /// receive loop.
    pub fn deliver_media(&self, data: &[u8]) -> i32 {
        let class = match protocol::classify_media(data) {
            Ok(class) => class,
            Err(MixerError::MisroutedControl(pt)) => {
                // Receiver reports and feedback are demuxed upstream;
                // one landing here means a wiring bug on the caller side.
                self.metrics.record_invalid();
                tracing::warn!(packet_type = pt, "receiver-class control packet on media path");
                return 0;
            }
            Err(error) => {
                self.metrics.record_invalid();
                tracing::warn!(%error, len = data.len(), "discarding unclassifiable packet");
                return 0;
            }
        };

        let ssrc = class.ssrc();
        match self.registry.with_source(ssrc, |entry| entry.pipeline().deliver_media(data)) {
            Some(code) => {
                self.metrics.record_routed(data.len());
                code
            }
            None => {
                self.metrics.record_dropped();
                tracing::trace!(ssrc, kind = ?class, "no pipeline for source, dropping packet");
                0
            }
        }
    }

    /// Forward one inbound feedback packet to the shared output pipeline.
    ///
    /// There is exactly one mixed output stream, so feedback never consults
    /// the registry.
    pub fn deliver_feedback(&self, data: &[u8]) -> i32 {
        self.metrics.record_feedback();
        self.output.deliver_feedback(data)
    }

    /// Audio is handled by a separate mixer instance; this core always
    /// rejects it.
    pub fn deliver_audio(&self, _data: &[u8]) -> Result<()> {
        Err(MixerError::UnsupportedMedia(MediaKind::Audio))
    }
}
