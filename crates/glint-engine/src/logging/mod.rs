//! Logging setup.
//!
//! The crate logs through the `log` facade only. Hosts that already install a
//! logger can ignore this module; everyone else calls [`init_logging`] early.

mod init;

pub use init::{init_logging, LoggingConfig};
