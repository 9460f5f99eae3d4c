//! RTP fixed-header parsing
//!
//! Inbound media packets carry the RTP fixed header (RFC 3550 §5.1):
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |V=2|P|X|  CC   |M|     PT      |       sequence number         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           synchronization source (SSRC) identifier            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Routing only needs the SSRC, but the full fixed header is exposed so
//! callers can inspect payload type and sequencing without reparsing.

use crate::error::{MixerError, Result};

/// Synchronization source identifier; uniquely identifies one media
/// stream's origin within the wire protocol.
pub type Ssrc = u32;

/// Protocol version carried in the two top bits of the first octet
pub const RTP_VERSION: u8 = 2;

/// Length of the RTP fixed header (without CSRC list)
pub const RTP_HEADER_LEN: usize = 12;

/// Parsed RTP fixed header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpHeader {
    /// Protocol version (must be 2)
    pub version: u8,
    /// Padding flag
    pub padding: bool,
    /// Extension flag
    pub extension: bool,
    /// Number of CSRC entries following the fixed header
    pub csrc_count: u8,
    /// Marker bit
    pub marker: bool,
    /// Payload type (7 bits)
    pub payload_type: u8,
    /// Sequence number
    pub sequence: u16,
    /// Media timestamp
    pub timestamp: u32,
    /// Synchronization source
    pub ssrc: Ssrc,
}

impl RtpHeader {
    /// Parse the fixed header from the front of a packet
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < RTP_HEADER_LEN {
            return Err(MixerError::PacketTooShort { len: data.len() });
        }

        let version = data[0] >> 6;
        if version != RTP_VERSION {
            return Err(MixerError::BadRtpVersion(version));
        }

        Ok(Self {
            version,
            padding: data[0] & 0x20 != 0,
            extension: data[0] & 0x10 != 0,
            csrc_count: data[0] & 0x0F,
            marker: data[1] & 0x80 != 0,
            payload_type: data[1] & 0x7F,
            sequence: u16::from_be_bytes([data[2], data[3]]),
            timestamp: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            ssrc: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
        })
    }
}
