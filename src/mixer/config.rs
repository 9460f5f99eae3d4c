//! Mixer configuration

use crate::protocol::Ssrc;

/// Default number of composition slots in a deployment
pub const DEFAULT_MAX_SLOTS: usize = 16;

/// Default identifier of the mixed output stream
pub const DEFAULT_OUTPUT_SSRC: Ssrc = 0x4D49_5856; // "MIXV"

/// Mixer configuration options
#[derive(Debug, Clone)]
pub struct MixerConfig {
    /// Number of composition slots; hard cap on concurrent participants.
    /// Used to size the default composition buffer.
    pub max_slots: usize,

    /// Synchronization source advertised for the mixed output stream
    pub output_ssrc: Ssrc,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            max_slots: DEFAULT_MAX_SLOTS,
            output_ssrc: DEFAULT_OUTPUT_SSRC,
        }
    }
}

impl MixerConfig {
    /// Set the number of composition slots
    pub fn max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// Set the output stream identifier
    pub fn output_ssrc(mut self, ssrc: Ssrc) -> Self {
        self.output_ssrc = ssrc;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MixerConfig::default();

        assert_eq!(config.max_slots, DEFAULT_MAX_SLOTS);
        assert_eq!(config.output_ssrc, DEFAULT_OUTPUT_SSRC);
    }

    #[test]
    fn test_builder_chaining() {
        let config = MixerConfig::default().max_slots(4).output_ssrc(0x1234);

        assert_eq!(config.max_slots, 4);
        assert_eq!(config.output_ssrc, 0x1234);
    }
}
