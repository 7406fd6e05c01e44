//! Log record types.

pub mod log;

pub use log::{Log, RawLog};
