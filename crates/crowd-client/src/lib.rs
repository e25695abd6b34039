//! # crowd-client
//!
//! The simulator's only I/O boundary. [`QaService`] is the contract the
//! scheduler drives; [`HttpQaClient`] speaks JSON over HTTP to a live service
//! and [`MockQaService`] stands in for it in tests.

pub mod http;
pub mod mock;
pub mod service;

pub use http::HttpQaClient;
pub use mock::{MockQaService, RecordedCall};
pub use service::{CreatedAnswer, CreatedQuestion, QaService, Registration};
