//! RTCP common-header parsing
//!
//! Control packets share the RTCP common header (RFC 3550 §6.4):
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |V=2|P|   RC    |  packet type  |            length             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    SSRC of packet sender                      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The packet-type octet is what distinguishes control traffic from media on
//! a muxed channel: RTCP types occupy 192..=223, a range that cannot appear
//! as the second octet of an RTP packet (marker bit + 7-bit payload type).

use crate::error::{MixerError, Result};
use crate::protocol::rtp::Ssrc;

/// Length of the RTCP common header
pub const RTCP_HEADER_LEN: usize = 8;

/// First packet-type value of the RTCP range
pub const RTCP_PT_MIN: u8 = 192;
/// Last packet-type value of the RTCP range
pub const RTCP_PT_MAX: u8 = 223;

/// RTCP packet types relevant to mixing-node routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcpPacketType {
    /// Sender report: a stream's own sending statistics
    SenderReport = 200,
    /// Receiver report: reception statistics about other streams
    ReceiverReport = 201,
    /// Source description
    SourceDescription = 202,
    /// Goodbye
    Bye = 203,
    /// Application-defined
    App = 204,
    /// Transport-layer feedback (RFC 4585)
    TransportFeedback = 205,
    /// Payload-specific feedback (RFC 4585)
    PayloadFeedback = 206,
}

impl RtcpPacketType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            200 => Some(RtcpPacketType::SenderReport),
            201 => Some(RtcpPacketType::ReceiverReport),
            202 => Some(RtcpPacketType::SourceDescription),
            203 => Some(RtcpPacketType::Bye),
            204 => Some(RtcpPacketType::App),
            205 => Some(RtcpPacketType::TransportFeedback),
            206 => Some(RtcpPacketType::PayloadFeedback),
            _ => None,
        }
    }

    /// Receiver reports and feedback describe *other* streams and carry no
    /// usable source identity for routing.
    pub fn is_receiver_class(&self) -> bool {
        matches!(
            self,
            RtcpPacketType::ReceiverReport
                | RtcpPacketType::TransportFeedback
                | RtcpPacketType::PayloadFeedback
        )
    }
}

/// Parsed RTCP common header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcpHeader {
    /// Protocol version
    pub version: u8,
    /// Padding flag
    pub padding: bool,
    /// Report count (5 bits)
    pub report_count: u8,
    /// Raw packet-type octet
    pub packet_type: u8,
    /// Packet length in 32-bit words minus one
    pub length: u16,
    /// SSRC of the packet sender
    pub ssrc: Ssrc,
}

impl RtcpHeader {
    /// Parse the common header from the front of a packet
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < RTCP_HEADER_LEN {
            return Err(MixerError::PacketTooShort { len: data.len() });
        }

        Ok(Self {
            version: data[0] >> 6,
            padding: data[0] & 0x20 != 0,
            report_count: data[0] & 0x1F,
            packet_type: data[1],
            length: u16::from_be_bytes([data[2], data[3]]),
            ssrc: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
        })
    }

    /// Well-known packet type, if this is one
    pub fn typed(&self) -> Option<RtcpPacketType> {
        RtcpPacketType::from_byte(self.packet_type)
    }
}

/// Check whether a muxed-channel packet is RTCP (by packet-type range)
pub fn is_rtcp(data: &[u8]) -> bool {
    data.len() >= 2 && (RTCP_PT_MIN..=RTCP_PT_MAX).contains(&data[1])
}
