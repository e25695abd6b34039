//! In-process Q&A service for deterministic testing.
//!
//! Hands out sequential ids without any network traffic, and records every
//! call so tests can assert on exactly what the scheduler sent.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::service::*;
use crowd_core::{CrowdError, Result, TargetKind, VoteDirection};

/// One call received by [`MockQaService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Register {
        name: String,
        description: String,
    },
    CreateQuestion {
        credential: String,
        title: String,
        content: String,
        tags: Vec<String>,
    },
    CreateAnswer {
        credential: String,
        question_id: String,
        content: String,
    },
    Vote {
        credential: String,
        target_id: String,
        target: TargetKind,
        direction: VoteDirection,
    },
}

#[derive(Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    failures: VecDeque<CrowdError>,
    taken_names: HashSet<String>,
    next_question: u64,
    next_answer: u64,
}

/// A [`QaService`] that succeeds unless told otherwise.
///
/// # Example
/// ```
/// use crowd_client::MockQaService;
/// let service = MockQaService::new()
///     .with_taken_name("Ava")
///     .with_failure(crowd_core::CrowdError::Transport("down".into()));
/// ```
#[derive(Clone, Default)]
pub struct MockQaService {
    state: Arc<Mutex<MockState>>,
}

impl MockQaService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering this exact name yields a conflict.
    pub fn with_taken_name(self, name: &str) -> Self {
        self.state.lock().taken_names.insert(name.to_string());
        self
    }

    /// Queue an error; the next call of any kind returns it.
    pub fn with_failure(self, error: CrowdError) -> Self {
        self.queue_failure(error);
        self
    }

    pub fn queue_failure(&self, error: CrowdError) {
        self.state.lock().failures.push_back(error);
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Number of content-producing calls (questions, answers, votes).
    pub fn action_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| !matches!(c, RecordedCall::Register { .. }))
            .count()
    }

    /// Record the call, then either pop a queued failure or run `ok`.
    fn handle<T>(&self, call: RecordedCall, ok: impl FnOnce(&mut MockState) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        ok(&mut state)
    }
}

#[async_trait]
impl QaService for MockQaService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn register(&self, name: &str, description: &str) -> Result<Registration> {
        let call = RecordedCall::Register {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.handle(call, |state| {
            if !state.taken_names.insert(name.to_string()) {
                return Err(CrowdError::RegistrationConflict(name.to_string()));
            }
            Ok(Registration {
                name: name.to_string(),
                credential: format!("key-{}", name.to_lowercase()),
            })
        })
    }

    async fn create_question(
        &self,
        credential: &str,
        title: &str,
        content: &str,
        tags: &[String],
    ) -> Result<CreatedQuestion> {
        let call = RecordedCall::CreateQuestion {
            credential: credential.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.to_vec(),
        };
        self.handle(call, |state| {
            state.next_question += 1;
            Ok(CreatedQuestion {
                id: format!("q{}", state.next_question),
                title: title.to_string(),
            })
        })
    }

    async fn create_answer(
        &self,
        credential: &str,
        question_id: &str,
        content: &str,
    ) -> Result<CreatedAnswer> {
        let call = RecordedCall::CreateAnswer {
            credential: credential.to_string(),
            question_id: question_id.to_string(),
            content: content.to_string(),
        };
        self.handle(call, |state| {
            state.next_answer += 1;
            Ok(CreatedAnswer {
                id: format!("a{}", state.next_answer),
            })
        })
    }

    async fn vote(
        &self,
        credential: &str,
        target_id: &str,
        target: TargetKind,
        direction: VoteDirection,
    ) -> Result<()> {
        let call = RecordedCall::Vote {
            credential: credential.to_string(),
            target_id: target_id.to_string(),
            target,
            direction,
        };
        self.handle(call, |_| Ok(()))
    }
}
