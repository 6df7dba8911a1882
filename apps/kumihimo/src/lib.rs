//! # kumihimo
//!
//! Server, CLI and solver bridge for the Kumihimo pattern designer.
//!
//! The pure logic lives in `kumihimo-core`; this crate adds everything that
//! touches the network, the filesystem or the terminal.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
