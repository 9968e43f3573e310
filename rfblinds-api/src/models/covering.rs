use alloc::string::String;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionState {
    /// Not moving, current position equals target position
    #[default]
    Stopped,
    /// Opening towards a higher position
    Increasing,
    /// Closing towards a lower position
    Decreasing,
}

impl core::fmt::Display for MotionState {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            MotionState::Stopped => write!(f, "stopped"),
            MotionState::Increasing => write!(f, "increasing"),
            MotionState::Decreasing => write!(f, "decreasing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveringConfig {
    /// Unique key of the covering
    #[serde(alias = "serialNumber")]
    pub serial_number: String,
    /// Display name
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    /// RF code that starts opening
    #[serde(alias = "open")]
    pub open_code: u64,
    /// RF code that starts closing
    #[serde(alias = "close")]
    pub close_code: u64,
    /// RF code that halts the motor
    #[serde(alias = "stop")]
    pub stop_code: u64,
    /// Time to travel from fully closed to fully open in milliseconds
    #[serde(alias = "time")]
    pub full_travel_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoveringStatus {
    pub serial_number: String,
    pub name: String,
    /// Position in percent, 0 is closed and 100 is open
    pub current_position: u8,
    /// Last commanded position in percent
    pub target_position: u8,
    pub motion_state: MotionState,
    /// Whether the covering has been exposed to the control surface
    pub registered: bool,
    /// Time of the last state change
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetPositionRequest {
    /// Requested position, must be within 0..=100
    pub position: i32,
}
