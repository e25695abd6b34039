//! # crowd-cli
//!
//! Command-line interface for the Crowd traffic simulator.
//!
//! ## Commands
//!
//! - `crowd run`: Register the roster and drive the scheduler until Ctrl-C
//! - `crowd config`: Show the resolved configuration
//! - `crowd personas`: List the built-in personas
//! - `crowd topics`: List the seed topic pool
//! - `crowd version`: Show version and build info

pub mod commands;

pub use commands::Cli;
