//! Logging for the orient crate.

mod macros;

pub use log::{Level, debug, info, log, log_enabled};
