mod covering;
mod pulse;

pub use covering::*;
pub use pulse::*;

/// Fully closed covering position
pub const MIN_POSITION: u8 = 0;
/// Fully open covering position
pub const MAX_POSITION: u8 = 100;
