//! Configuration module
//!
//! Handles user configuration (`<config dir>/wrk/config.toml`) layered with
//! `WRK_*` environment variables.

mod settings;

pub use settings::*;
