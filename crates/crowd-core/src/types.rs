use serde::{Deserialize, Serialize};
use std::fmt;

/// A simulated actor: a registered identity bound to a persona.
///
/// Created once at startup from a successful registration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Name as accepted by the remote service (may carry a disambiguating suffix).
    pub name: String,
    /// Key into the persona registry.
    pub persona: String,
    /// Opaque bearer credential returned by registration.
    pub credential: String,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        persona: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            persona: persona.into(),
            credential: credential.into(),
        }
    }
}

/// A seed question from the fixed topic pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicItem {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Declared category label, e.g. "coding". Resolved through [`TopicCategory::from_label`].
    pub category: String,
}

impl TopicItem {
    pub fn new(title: &str, body: &str, tags: &[&str], category: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: category.to_string(),
        }
    }

    pub fn resolved_category(&self) -> TopicCategory {
        TopicCategory::from_label(&self.category)
    }
}

/// Topic categories that have their own answer tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicCategory {
    Coding,
    Robotics,
    Tech,
}

impl TopicCategory {
    /// Category used when a topic declares a label nobody recognises.
    pub const DEFAULT: TopicCategory = TopicCategory::Tech;

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "coding" => TopicCategory::Coding,
            "robotics" => TopicCategory::Robotics,
            "tech" => TopicCategory::Tech,
            _ => Self::DEFAULT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCategory::Coding => "coding",
            TopicCategory::Robotics => "robotics",
            TopicCategory::Tech => "tech",
        }
    }
}

/// What a vote is cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Question,
    Answer,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Question => "question",
            TargetKind::Answer => "answer",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub const ALL: [VoteDirection; 2] = [VoteDirection::Up, VoteDirection::Down];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The coarse action classes the scheduler draws from each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Ask,
    Answer,
    Vote,
    Idle,
}

impl ActionKind {
    /// Order matches the weight table in the scheduler config.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Ask,
        ActionKind::Answer,
        ActionKind::Vote,
        ActionKind::Idle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Ask => "ask",
            ActionKind::Answer => "answer",
            ActionKind::Vote => "vote",
            ActionKind::Idle => "idle",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
