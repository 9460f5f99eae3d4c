//! Delivery counters for the mixing node
//!
//! Dropped packets during join/leave churn are expected, not errors; these
//! counters are how that traffic stays observable. All counters are relaxed
//! atomics — delivery threads bump them without coordination.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters owned by the mixer
#[derive(Debug, Default)]
pub struct MixerMetrics {
    routed_packets: AtomicU64,
    routed_bytes: AtomicU64,
    dropped_packets: AtomicU64,
    invalid_packets: AtomicU64,
    feedback_packets: AtomicU64,
}

impl MixerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A packet was forwarded to a source pipeline
    pub fn record_routed(&self, len: usize) {
        self.routed_packets.fetch_add(1, Ordering::Relaxed);
        self.routed_bytes.fetch_add(len as u64, Ordering::Relaxed);
    }

    /// A packet carried an unrecognized source id
    pub fn record_dropped(&self) {
        self.dropped_packets.fetch_add(1, Ordering::Relaxed);
    }

    /// A packet was malformed or misrouted
    pub fn record_invalid(&self) {
        self.invalid_packets.fetch_add(1, Ordering::Relaxed);
    }

    /// A feedback packet was forwarded to the output pipeline
    pub fn record_feedback(&self) {
        self.feedback_packets.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            routed_packets: self.routed_packets.load(Ordering::Relaxed),
            routed_bytes: self.routed_bytes.load(Ordering::Relaxed),
            dropped_packets: self.dropped_packets.load(Ordering::Relaxed),
            invalid_packets: self.invalid_packets.load(Ordering::Relaxed),
            feedback_packets: self.feedback_packets.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the mixer's delivery counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Packets forwarded to a source pipeline
    pub routed_packets: u64,
    /// Bytes forwarded to source pipelines
    pub routed_bytes: u64,
    /// Packets dropped for an unrecognized source id
    pub dropped_packets: u64,
    /// Malformed or misrouted packets discarded
    pub invalid_packets: u64,
    /// Feedback packets forwarded to the output pipeline
    pub feedback_packets: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = MixerMetrics::new();

        metrics.record_routed(100);
        metrics.record_routed(50);
        metrics.record_dropped();
        metrics.record_invalid();
        metrics.record_feedback();

        let snap = metrics.snapshot();
        assert_eq!(snap.routed_packets, 2);
        assert_eq!(snap.routed_bytes, 150);
        assert_eq!(snap.dropped_packets, 1);
        assert_eq!(snap.invalid_packets, 1);
        assert_eq!(snap.feedback_packets, 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let metrics = MixerMetrics::new();
        metrics.record_routed(10);

        let before = metrics.snapshot();
        metrics.record_routed(10);

        assert_eq!(before.routed_packets, 1);
        assert_eq!(metrics.snapshot().routed_packets, 2);
    }
}
