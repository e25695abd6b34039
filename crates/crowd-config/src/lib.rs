//! # crowd-config
//!
//! Configuration system for the Crowd simulator. Reads from `crowd.toml` and
//! environment variables; CLI flags are applied on top by the caller.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::CrowdConfig;
pub use schema::{ConfigWarning, IntervalConfig, WarningSeverity};
