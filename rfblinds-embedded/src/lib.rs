#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod rf;

pub use error::*;
pub use rf::*;
