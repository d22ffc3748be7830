//! Command-line configuration and logging.

pub(crate) mod config;
pub(crate) mod logging;
