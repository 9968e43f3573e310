mod covering_handle;

pub use covering_handle::*;
