//! Outbound transport endpoints
//!
//! Pipelines emit two kinds of outbound traffic: mixed media (from the
//! output pipeline) and feedback toward a participant (from a per-source
//! pipeline). A [`TransportAdapter`] pairs one optional endpoint of each
//! kind, so the same adapter type serves both directions of the original
//! two-sided transport: the mixed-output adapter has only a media side, a
//! per-source adapter has only a feedback side. Sends on an unwired side are
//! dropped and reported as 0 bytes.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

/// Endpoint accepting outbound mixed-media packets
pub trait MediaSink: Send + Sync {
    /// Consume one outbound media packet; returns bytes accepted
    fn on_media(&self, data: &[u8]) -> i32;
}

/// Endpoint accepting outbound feedback packets
pub trait FeedbackSink: Send + Sync {
    /// Consume one outbound feedback packet; returns bytes accepted
    fn on_feedback(&self, data: &[u8]) -> i32;
}

/// Two-sided outbound adapter handed to a pipeline at construction
#[derive(Clone, Default)]
pub struct TransportAdapter {
    media: Option<Arc<dyn MediaSink>>,
    feedback: Option<Arc<dyn FeedbackSink>>,
}

impl TransportAdapter {
    pub fn new(media: Option<Arc<dyn MediaSink>>, feedback: Option<Arc<dyn FeedbackSink>>) -> Self {
        Self { media, feedback }
    }

    /// Adapter for the mixed output direction (media only)
    pub fn outbound(media: Arc<dyn MediaSink>) -> Self {
        Self::new(Some(media), None)
    }

    /// Adapter for a per-source direction (feedback only)
    pub fn feedback_only(feedback: Arc<dyn FeedbackSink>) -> Self {
        Self::new(None, Some(feedback))
    }

    /// Send a media packet, dropping it if no media side is wired
    pub fn send_media(&self, data: &[u8]) -> i32 {
        match &self.media {
            Some(sink) => sink.on_media(data),
            None => 0,
        }
    }

    /// Send a feedback packet, dropping it if no feedback side is wired
    pub fn send_feedback(&self, data: &[u8]) -> i32 {
        match &self.feedback {
            Some(sink) => sink.on_feedback(data),
            None => 0,
        }
    }
}

impl std::fmt::Debug for TransportAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportAdapter")
            .field("media", &self.media.is_some())
            .field("feedback", &self.feedback.is_some())
            .finish()
    }
}

/// Channel-backed sink for embedders that forward outbound packets to an
/// async writer task. Packets are copied once into `Bytes`; the receiver
/// side shares that allocation from then on.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Bytes>,
}

impl ChannelSink {
    /// Create a sink and the receiver end it feeds
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, data: &[u8]) -> i32 {
        match self.tx.send(Bytes::copy_from_slice(data)) {
            Ok(()) => data.len() as i32,
            // Receiver gone; the writer task has shut down
            Err(_) => 0,
        }
    }
}

impl MediaSink for ChannelSink {
    fn on_media(&self, data: &[u8]) -> i32 {
        self.forward(data)
    }
}

impl FeedbackSink for ChannelSink {
    fn on_feedback(&self, data: &[u8]) -> i32 {
        self.forward(data)
    }
}
