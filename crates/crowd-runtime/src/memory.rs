use chrono::{DateTime, Duration, Utc};
use crowd_core::{TargetKind, TopicItem};

/// A question the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedQuestion {
    pub id: String,
    /// The seed topic the question was written from.
    pub topic: TopicItem,
    pub created_at: DateTime<Utc>,
    /// Registered name of the asking participant.
    pub author: String,
}

impl PostedQuestion {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }
}

/// An answer the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedAnswer {
    pub id: String,
    pub question_id: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
}

/// Everything this process has successfully posted, in posting order.
///
/// Records are appended only after the remote service acknowledged them and
/// are never removed, so memory grows with run length.
#[derive(Debug, Clone, Default)]
pub struct ActivityMemory {
    questions: Vec<PostedQuestion>,
    answers: Vec<PostedAnswer>,
}

impl ActivityMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_question(&mut self, question: PostedQuestion) {
        self.questions.push(question);
    }

    pub fn record_answer(&mut self, answer: PostedAnswer) {
        self.answers.push(answer);
    }

    pub fn questions(&self) -> &[PostedQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[PostedAnswer] {
        &self.answers
    }

    pub fn question(&self, id: &str) -> Option<&PostedQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions at least `min_age` old at `now`.
    pub fn eligible_for_answer(&self, now: DateTime<Utc>, min_age: Duration) -> Vec<&PostedQuestion> {
        self.questions
            .iter()
            .filter(|q| q.age(now) >= min_age)
            .collect()
    }

    /// What a vote can land on: questions when any exist, else answers.
    pub fn vote_targets(&self) -> Option<(TargetKind, Vec<&str>)> {
        if !self.questions.is_empty() {
            let ids = self.questions.iter().map(|q| q.id.as_str()).collect();
            Some((TargetKind::Question, ids))
        } else if !self.answers.is_empty() {
            let ids = self.answers.iter().map(|a| a.id.as_str()).collect();
            Some((TargetKind::Answer, ids))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty() && self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, created_at: DateTime<Utc>) -> PostedQuestion {
        PostedQuestion {
            id: id.into(),
            topic: TopicItem::new("t", "b", &[], "tech"),
            created_at,
            author: "Ava".into(),
        }
    }

    #[test]
    fn test_eligibility_threshold_is_inclusive() {
        let start = Utc::now();
        let mut memory = ActivityMemory::new();
        memory.record_question(question("q1", start));

        let min = Duration::seconds(900);
        assert!(memory.eligible_for_answer(start + Duration::seconds(899), min).is_empty());
        assert_eq!(memory.eligible_for_answer(start + Duration::seconds(900), min).len(), 1);
    }

    #[test]
    fn test_vote_targets_prefer_questions() {
        let mut memory = ActivityMemory::new();
        assert!(memory.vote_targets().is_none());

        memory.record_answer(PostedAnswer {
            id: "a1".into(),
            question_id: "gone".into(),
            created_at: Utc::now(),
            author: "Theo".into(),
        });
        let (kind, ids) = memory.vote_targets().unwrap();
        assert_eq!(kind, TargetKind::Answer);
        assert_eq!(ids, vec!["a1"]);

        memory.record_question(question("q1", Utc::now()));
        let (kind, ids) = memory.vote_targets().unwrap();
        assert_eq!(kind, TargetKind::Question);
        assert_eq!(ids, vec!["q1"]);
    }
}
