//! # crowd-runtime
//!
//! The behavioral scheduler and everything it owns.
//!
//! ```text
//!   roster ──► Scheduler::step ──► driver::run
//!                 │   ▲
//!     weights ────┘   │ memory, recency window, stats
//!                 ▼   │
//!        ContentProvider, QaService
//! ```
//!
//! The roster registers participants once at startup. After that the driver
//! calls [`Scheduler::step`] in a loop and sleeps for the delay each step asks
//! for, until cancelled.

pub mod driver;
pub mod memory;
pub mod pacing;
pub mod recency;
pub mod roster;
pub mod scheduler;
pub mod stats;

pub use memory::{ActivityMemory, PostedAnswer, PostedQuestion};
pub use pacing::{PaceClass, PacingPolicy};
pub use recency::{RecencyWindow, TopicPick, pick_topic};
pub use roster::register_roster;
pub use scheduler::{Performed, Scheduler, SchedulerSettings, SkipReason, StepOutcome};
pub use stats::ActivityStats;
