//! Git integration through the command line
//!
//! - `GitRunner` / `GitExecutor` - Process invocation
//! - `parse` - Porcelain output parsers
//! - `Git` - Typed operations used by the commands

mod client;
#[cfg(test)]
mod fake;
pub mod parse;
mod runner;

pub use client::*;
#[cfg(test)]
pub(crate) use fake::FakeRunner;
pub use runner::*;
