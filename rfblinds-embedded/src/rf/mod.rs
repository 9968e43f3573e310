mod encoder;
mod transmitter;

pub use encoder::{bit_length, bits, encode};
pub use transmitter::RfTransmitter;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// One segment of a pulse train: the line held at `level` for `duration_us`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub level: Level,
    pub duration_us: u32,
}

impl Pulse {
    pub const fn high(duration_us: u32) -> Self {
        Self {
            level: Level::High,
            duration_us,
        }
    }

    pub const fn low(duration_us: u32) -> Self {
        Self {
            level: Level::Low,
            duration_us,
        }
    }
}

/// Sends RF codes. A call blocks until the whole pulse train has been emitted.
pub trait Transmit {
    fn transmit(&mut self, code: u64) -> Result<()>;
}
