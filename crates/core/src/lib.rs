#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod share;
pub mod time;
pub mod timer;
pub mod tone;

pub use error::Error;
pub use time::Clock;
