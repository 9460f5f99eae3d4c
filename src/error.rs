//! Mixer error types
//!
//! Capacity and lookup-miss conditions are recoverable and reported to the
//! caller. Duplicate/unknown source ids and misrouted control packets are
//! structural faults: they indicate a caller-side logic error, but a serving
//! node must stay up under malformed control input, so they are error values
//! rather than panics.

use thiserror::Error;

use crate::mixer::MediaKind;
use crate::protocol::Ssrc;

/// Error type for mixer operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MixerError {
    /// All composition slots are occupied
    #[error("mixer is at capacity ({max_slots} slots)")]
    CapacityExceeded {
        /// Number of composition slots in this deployment
        max_slots: usize,
    },

    /// A source with this id is already registered
    #[error("source {0} is already registered")]
    DuplicateSource(Ssrc),

    /// No source with this id is registered
    #[error("source {0} is not registered")]
    UnknownSource(Ssrc),

    /// The operation targets a modality this mixer does not handle
    #[error("{0:?} media is not handled by this mixer")]
    UnsupportedMedia(MediaKind),

    /// A receiver-class control packet reached the media delivery path;
    /// these are routed upstream of this core
    #[error("receiver-class control packet (type {0}) on the media path")]
    MisroutedControl(u8),

    /// Buffer too short to hold the claimed header
    #[error("packet too short ({len} bytes)")]
    PacketTooShort {
        /// Length of the offending buffer
        len: usize,
    },

    /// RTP version field is not 2
    #[error("unsupported RTP version {0}")]
    BadRtpVersion(u8),
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MixerError>;
