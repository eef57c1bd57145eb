//! # Built-in subscribers
//!
//! - [`LogWriter`]: renders events through `tracing` (enabled via the `logging` feature).

mod log;

pub use log::LogWriter;
