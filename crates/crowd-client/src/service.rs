use async_trait::async_trait;
use crowd_core::{Result, TargetKind, VoteDirection};
use serde::{Deserialize, Serialize};

/// A name accepted by the service together with its bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub credential: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedQuestion {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAnswer {
    pub id: String,
}

/// Remote Q&A service operations.
///
/// Every call is a single request/response. Implementations map a rejected
/// registration name to [`crowd_core::CrowdError::RegistrationConflict`],
/// network failures to `Transport`, and other non-success responses to
/// `RemoteRejection`.
#[async_trait]
pub trait QaService: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn register(&self, name: &str, description: &str) -> Result<Registration>;

    async fn create_question(
        &self,
        credential: &str,
        title: &str,
        content: &str,
        tags: &[String],
    ) -> Result<CreatedQuestion>;

    async fn create_answer(
        &self,
        credential: &str,
        question_id: &str,
        content: &str,
    ) -> Result<CreatedAnswer>;

    async fn vote(
        &self,
        credential: &str,
        target_id: &str,
        target: TargetKind,
        direction: VoteDirection,
    ) -> Result<()>;
}
