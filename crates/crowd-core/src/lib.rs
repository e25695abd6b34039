//! # crowd-core
//!
//! Core types and primitives for the Crowd simulator. This crate defines the
//! shared vocabulary used by every other crate in the workspace: the data
//! model, the error type, and the injectable sources of randomness and time.

pub mod clock;
pub mod error;
pub mod random;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CrowdError, Result};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use types::*;
