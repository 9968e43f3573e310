use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulsePair {
    /// Time the line is held high in microseconds
    #[serde(alias = "high")]
    pub high_us: u32,
    /// Time the line is held low in microseconds
    #[serde(alias = "low")]
    pub low_us: u32,
}

impl PulsePair {
    pub const fn new(high_us: u32, low_us: u32) -> Self {
        Self { high_us, low_us }
    }
}

/// Timing profile of the fixed RF protocol: one sync pair, then one pair per
/// code bit, the whole sequence repeated `repeat_count` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseProfile {
    /// GPIO line (BCM numbering) the transmitter is wired to
    pub pin: u8,
    /// Number of times the sync + code sequence is sent
    #[serde(alias = "repeat")]
    pub repeat_count: u32,
    /// Pair sent once at the start of every repetition
    pub sync: PulsePair,
    /// Pair sent for a `0` bit
    #[serde(alias = "0")]
    pub bit0: PulsePair,
    /// Pair sent for a `1` bit
    #[serde(alias = "1")]
    pub bit1: PulsePair,
}

impl PulseProfile {
    pub fn is_valid(&self) -> bool {
        self.repeat_count >= 1
    }

    pub fn bit(&self, one: bool) -> &PulsePair {
        if one { &self.bit1 } else { &self.bit0 }
    }
}
