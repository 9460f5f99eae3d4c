//! Wire-level packet classification
//!
//! Media-channel traffic reaching the mixer is a mix of RTP media packets
//! and the control packets that travel with them. Routing needs exactly one
//! thing from each packet: which participant it belongs to. That identity
//! lives in different places depending on the packet class:
//!
//! - sender reports carry it in the RTCP common header's sender SSRC;
//! - media packets (and any other control type) carry it in the RTP
//!   fixed header's SSRC field.
//!
//! Receiver reports and feedback-class packets are demuxed upstream of this
//! core and must never reach the media path; seeing one here is reported as
//! [`MixerError::MisroutedControl`].

pub mod rtcp;
pub mod rtp;

pub use rtcp::{is_rtcp, RtcpHeader, RtcpPacketType, RTCP_HEADER_LEN};
pub use rtp::{RtpHeader, Ssrc, RTP_HEADER_LEN, RTP_VERSION};

use crate::error::{MixerError, Result};

/// Routing class of an inbound media-channel packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketClass {
    /// A stream's own sending-statistics report
    SenderReport {
        /// Reporting stream's source identifier
        ssrc: Ssrc,
    },
    /// Media data (or non-report control traffic)
    Media {
        /// Originating stream's source identifier
        ssrc: Ssrc,
    },
}

impl PacketClass {
    /// Source identifier the packet routes by
    pub fn ssrc(&self) -> Ssrc {
        match self {
            PacketClass::SenderReport { ssrc } | PacketClass::Media { ssrc } => *ssrc,
        }
    }
}

/// Classify an inbound media-channel packet and extract its routing id
pub fn classify_media(data: &[u8]) -> Result<PacketClass> {
    if is_rtcp(data) {
        let header = RtcpHeader::parse(data)?;
        match header.typed() {
            Some(RtcpPacketType::SenderReport) => {
                return Ok(PacketClass::SenderReport { ssrc: header.ssrc });
            }
            Some(t) if t.is_receiver_class() => {
                return Err(MixerError::MisroutedControl(header.packet_type));
            }
            // Other control types route by the media-header field, matching
            // the sender-report/everything-else split of the wire contract.
            _ => {}
        }
    }

    let header = RtpHeader::parse(data)?;
    Ok(PacketClass::Media { ssrc: header.ssrc })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rtp_packet(ssrc: Ssrc) -> Vec<u8> {
        let mut buf = vec![0u8; RTP_HEADER_LEN + 8];
        buf[0] = 0x80;
        buf[1] = 96;
        buf[8..12].copy_from_slice(&ssrc.to_be_bytes());
        buf
    }

    fn rtcp_packet(packet_type: u8, ssrc: Ssrc) -> Vec<u8> {
        let mut buf = vec![0u8; RTCP_HEADER_LEN + 4];
        buf[0] = 0x80;
        buf[1] = packet_type;
        buf[4..8].copy_from_slice(&ssrc.to_be_bytes());
        buf
    }

    #[test]
    fn test_media_packet_routes_by_rtp_ssrc() {
        let class = classify_media(&rtp_packet(42)).unwrap();
        assert_eq!(class, PacketClass::Media { ssrc: 42 });
        assert_eq!(class.ssrc(), 42);
    }

    #[test]
    fn test_sender_report_routes_by_rtcp_ssrc() {
        let class = classify_media(&rtcp_packet(200, 42)).unwrap();
        assert_eq!(class, PacketClass::SenderReport { ssrc: 42 });
        assert_eq!(class.ssrc(), 42);
    }

    #[test]
    fn test_receiver_class_is_misrouted() {
        for pt in [201, 205, 206] {
            let err = classify_media(&rtcp_packet(pt, 42)).unwrap_err();
            assert_eq!(err, MixerError::MisroutedControl(pt));
        }
    }

    #[test]
    fn test_short_packet_rejected() {
        assert!(matches!(
            classify_media(&[0x80, 96, 0]),
            Err(MixerError::PacketTooShort { len: 3 })
        ));
    }
}
