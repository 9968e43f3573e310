use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    PinUnavailable,
    TransmitFailure,
    InvalidProfile,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PinUnavailable => write!(f, "GPIO pin unavailable"),
            Error::TransmitFailure => write!(f, "Failed to drive GPIO pin"),
            Error::InvalidProfile => write!(f, "Invalid pulse profile"),
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
