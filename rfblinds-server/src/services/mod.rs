mod covering_control;
mod covering_registry;
mod transmitter_service;

pub use covering_control::*;
pub use covering_registry::*;
pub use transmitter_service::*;
