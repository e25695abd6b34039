use crowd_config::IntervalConfig;
use crowd_config::schema::PacingConfig;
use crowd_core::RandomSource;
use crowd_core::random::uniform_between;
use serde::Serialize;
use std::time::Duration;

/// Which delay range follows an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceClass {
    Idle,
    Question,
    Answer,
}

impl PaceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceClass::Idle => "idle",
            PaceClass::Question => "question",
            PaceClass::Answer => "answer",
        }
    }
}

/// Per-class delay ranges, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingPolicy {
    idle: IntervalConfig,
    question: IntervalConfig,
    answer: IntervalConfig,
}

impl PacingPolicy {
    pub fn new(idle: IntervalConfig, question: IntervalConfig, answer: IntervalConfig) -> Self {
        Self {
            idle,
            question,
            answer,
        }
    }

    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(config.idle, config.question, config.answer)
    }

    /// Every class waits exactly `secs`.
    pub fn fixed(secs: f64) -> Self {
        let i = IntervalConfig::new(secs, secs);
        Self::new(i, i, i)
    }

    pub fn interval(&self, class: PaceClass) -> IntervalConfig {
        match class {
            PaceClass::Idle => self.idle,
            PaceClass::Question => self.question,
            PaceClass::Answer => self.answer,
        }
    }

    /// A fresh uniform draw from the class's range. Consumes one unit draw
    /// unless the range is a single point.
    pub fn delay(&self, class: PaceClass, rng: &mut dyn RandomSource) -> Duration {
        let range = self.interval(class);
        let secs = uniform_between(rng, range.min_secs, range.max_secs);
        Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO)
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::from_config(&PacingConfig::default())
    }
}
